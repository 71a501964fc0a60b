use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures talking to the Discord REST API on behalf of a user.
#[derive(Error, Debug)]
pub enum DiscordError {
    /// Discord answered with 429 Too Many Requests.
    ///
    /// Passed through to the client as 429 so the frontend can back off.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Discord answered with any other non-success status.
    ///
    /// Results in a 502 Bad Gateway response.
    #[error("Request failed with status {status}: {message}")]
    RequestFailed {
        /// HTTP status returned by Discord
        status: u16,
        /// Response body or reason phrase
        message: String,
    },
}

impl IntoResponse for DiscordError {
    fn into_response(self) -> Response {
        match self {
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(ErrorDto {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            Self::RequestFailed { .. } => {
                tracing::warn!("{}", self);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto {
                        error: "Failed to reach Discord".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
