use thiserror::Error;

/// Message shown in place of an option's own reason when its whole group is denied.
pub const NOT_ALLOWED_GROUP_DISALLOWED: &str = "NOT_ALLOWED_GROUP_DISALLOWED";

/// Why a single group or option update was not applied.
///
/// The display text is exactly the `error` string returned to the client in the
/// write response, so variants with an optional author message fall back to a
/// fixed default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("Group with id {0} not found")]
    GroupNotFound(String),

    #[error("Option with id {0} not found")]
    OptionNotFound(String),

    /// The group's access check denied the user.
    #[error("{}", .0.as_deref().unwrap_or(NOT_ALLOWED_GROUP_DISALLOWED))]
    GroupDisallowed(Option<String>),

    /// The option's access check denied the user.
    #[error("{}", or_default(.message, "No permissions to manage option with id", .id))]
    OptionDisallowed { id: String, message: Option<String> },

    /// The setter returned an error result.
    #[error("{}", or_default(.message, "Failed to update option with id", .id))]
    SetRejected { id: String, message: Option<String> },

    /// An author callback returned an error or panicked.
    #[error("{0}")]
    Callback(String),
}

fn or_default(message: &Option<String>, prefix: &str, id: &str) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("{prefix} {id}"),
    }
}
