use std::num::ParseIntError;
use thiserror::Error;

/// Unexpected data or state, usually from an upstream service.
#[derive(Error, Debug)]
pub enum InternalError {
    /// Discord sent a guild permission bitfield that is not a decimal number.
    ///
    /// Such guilds are skipped when listing; if the error reaches a handler it
    /// results in a 500 Internal Server Error with a generic message.
    #[error("Failed to parse permissions '{value}': {source}")]
    ParsePermissions {
        value: String,
        #[source]
        source: ParseIntError,
    },
}
