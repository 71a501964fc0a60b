use thiserror::Error;

/// Invalid option or group definitions, raised when the dashboard is configured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Form option is missing an id")]
    MissingOptionId,

    #[error("Form option '{option}' is missing its {callback} callback")]
    MissingCallback {
        /// Id of the incomplete option
        option: String,
        /// Which callback was not provided (`on_request` or `on_update`)
        callback: &'static str,
    },

    #[error("Option group is missing an id")]
    MissingGroupId,

    #[error("Meta of '{0}' must be a JSON object")]
    InvalidMeta(String),

    #[error("Option id '{option}' is used more than once in group '{group}'")]
    DuplicateOptionId { group: String, option: String },

    #[error("Group id '{group}' is used more than once in the {namespace} options")]
    DuplicateGroupId {
        group: String,
        /// `user` or `guild`
        namespace: &'static str,
    },
}
