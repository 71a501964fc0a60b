//! Result values returned by author callbacks.
//!
//! These are the only vocabulary access checks and setters use to report their
//! outcome; the resolvers never inspect raw booleans.

/// Outcome of an option setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSetResult {
    /// Whether the update failed.
    pub error: bool,
    /// Optional reason shown to the user when `error` is set.
    pub message: Option<String>,
}

impl OptionSetResult {
    /// The value was stored.
    pub fn ok() -> Self {
        Self {
            error: false,
            message: None,
        }
    }

    /// The value was rejected without a reason.
    pub fn error() -> Self {
        Self {
            error: true,
            message: None,
        }
    }

    /// The value was rejected with a reason shown to the user.
    pub fn error_with(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        !self.error
    }
}

/// Outcome of a group or option access check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccessControlResult {
    #[default]
    Allowed,
    Disallowed {
        /// `false` hides the item from read responses entirely, `true` shows it disabled.
        display_in_api: bool,
        message: Option<String>,
    },
}

impl AccessControlResult {
    pub fn allowed() -> Self {
        Self::Allowed
    }

    pub fn disallowed(display_in_api: bool) -> Self {
        Self::Disallowed {
            display_in_api,
            message: None,
        }
    }

    pub fn disallowed_with(display_in_api: bool, message: impl Into<String>) -> Self {
        Self::Disallowed {
            display_in_api,
            message: Some(message.into()),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Whether the item should appear in read responses at all.
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Allowed => true,
            Self::Disallowed { display_in_api, .. } => *display_in_api,
        }
    }

    /// The denial reason, `None` when allowed or when no reason was given.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Disallowed { message, .. } => message.as_deref(),
        }
    }
}
