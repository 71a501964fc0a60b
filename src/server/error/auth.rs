use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// CSRF state validation failed during OAuth callback.
    ///
    /// The CSRF state token in the OAuth callback URL does not match the token stored
    /// in the session, indicating a potential CSRF attack or an invalid callback request.
    /// Results in a 400 Bad Request response.
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,

    /// No authenticated user is stored in the session.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("No user found in session")]
    UserNotInSession,

    /// The session has a user but no Discord OAuth tokens.
    ///
    /// Endpoints calling Discord on the user's behalf need the access token.
    /// Results in a 401 Unauthorized response.
    #[error("No OAuth tokens found in session")]
    MissingTokens,

    /// Exchanging an authorization code or refresh token with Discord failed.
    ///
    /// Results in a 400 Bad Request response with a generic message.
    #[error("Failed to exchange OAuth token: {0}")]
    TokenExchange(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `CsrfValidationFailed` / `TokenExchange` → 400 Bad Request with "There was an issue logging you in"
/// - `UserNotInSession` / `MissingTokens` → 401 Unauthorized
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::CsrfValidationFailed | Self::TokenExchange(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "There was an issue logging you in, please try again.".to_string(),
                }),
            )
                .into_response(),
            Self::UserNotInSession | Self::MissingTokens => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Not logged in".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
