use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::user::{SessionTokens, SessionUser},
};

/// Guard for endpoints that need a logged in Discord user.
///
/// Handlers call `require()` before touching any option callback so unauthenticated
/// requests are rejected with 401 without side effects.
pub struct AuthGuard<'a> {
    session: AuthSession<'a>,
}

impl<'a> AuthGuard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session: AuthSession::new(session),
        }
    }

    /// Returns the logged in user.
    ///
    /// # Returns
    /// - `Ok(SessionUser)` - User stored at login
    /// - `Err(AppError::AuthErr(UserNotInSession))` - Not logged in
    /// - `Err(AppError::SessionErr)` - Failed to access session
    pub async fn require(&self) -> Result<SessionUser, AppError> {
        let Some(user) = self.session.get_user().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        Ok(user)
    }

    /// Returns the logged in user together with their OAuth tokens.
    ///
    /// # Returns
    /// - `Ok((SessionUser, SessionTokens))` - User and tokens stored at login or refresh
    /// - `Err(AppError::AuthErr(UserNotInSession))` - Not logged in
    /// - `Err(AppError::AuthErr(MissingTokens))` - Logged in but no tokens stored
    pub async fn require_tokens(&self) -> Result<(SessionUser, SessionTokens), AppError> {
        let user = self.require().await?;

        let Some(tokens) = self.session.get_tokens().await? else {
            return Err(AuthError::MissingTokens.into());
        };

        Ok((user, tokens))
    }
}
