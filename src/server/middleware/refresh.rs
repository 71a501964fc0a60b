//! Discord token refresh ahead of request handling.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tower_sessions::Session;

use crate::server::{error::AppError, middleware::session::AuthSession, state::AppState};

/// Refreshes the session's Discord tokens when they expire within the refresh window.
///
/// A failed refresh clears the session; the request then continues unauthenticated and
/// protected endpoints answer 401. Requests without tokens pass through untouched.
///
/// Installed with `axum::middleware::from_fn_with_state` inside the session layer.
pub async fn refresh_tokens(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    if let Err(e) = refresh_session(&state, &session).await {
        return e.into_response();
    }

    next.run(request).await
}

/// Refreshes tokens stored in `session` if needed.
///
/// # Returns
/// - `Ok(true)` - Tokens were refreshed
/// - `Ok(false)` - Nothing to refresh, or the refresh failed and the session was cleared
/// - `Err(AppError::SessionErr)` - Failed to access session
pub async fn refresh_session(state: &AppState, session: &Session) -> Result<bool, AppError> {
    let auth_session = AuthSession::new(session);

    let Some(tokens) = auth_session.get_tokens().await? else {
        return Ok(false);
    };

    if !tokens.needs_refresh(Utc::now()) {
        return Ok(false);
    }

    let auth_service = state.auth_service();
    let refreshed = match auth_service.refresh(&tokens).await {
        Ok(refreshed) => refreshed,
        Err(e) => {
            tracing::warn!("Failed to refresh Discord token, logging user out: {}", e);
            auth_session.clear().await;
            return Ok(false);
        }
    };

    match auth_service.fetch_discord_user(&refreshed.access_token).await {
        Ok(user) => auth_session.set_user(&user).await?,
        Err(e) => tracing::debug!("Keeping previous session user after refresh: {}", e),
    }
    auth_session.set_tokens(&refreshed).await?;

    Ok(true)
}
