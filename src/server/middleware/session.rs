//! Type-safe session management wrappers.
//!
//! This module provides type-safe interfaces for managing different aspects of user sessions,
//! organized by concern. Each struct handles a specific domain of session data, preventing
//! typos, ensuring type consistency, and centralizing session-related logic.
//!
//! # Architecture
//!
//! Session management is split into focused concerns:
//! - `AuthSession` - Logged in Discord user and their OAuth tokens
//! - `CsrfSession` - CSRF token management for OAuth flows
//!
//! Each struct wraps the same underlying `Session` but exposes only the methods
//! relevant to its concern.

use tower_sessions::Session;

use crate::server::{
    error::AppError,
    model::user::{SessionTokens, SessionUser},
};

// Session key constants
const SESSION_AUTH_USER: &str = "auth:user";
const SESSION_AUTH_TOKENS: &str = "auth:tokens";
const SESSION_AUTH_CSRF_TOKEN: &str = "auth:csrf_token";

/// Authentication session management.
///
/// Handles the logged in user, their Discord OAuth tokens and the session lifecycle.
pub struct AuthSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    /// Creates a new AuthSession wrapper.
    ///
    /// # Arguments
    /// - `session` - Reference to the tower-sessions Session to wrap
    ///
    /// # Returns
    /// A new AuthSession instance
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the authenticated user in the session.
    ///
    /// Called after successful authentication to establish a logged-in session.
    ///
    /// # Arguments
    /// - `user` - The user returned by Discord
    ///
    /// # Returns
    /// - `Ok(())` - User successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_user(&self, user: &SessionUser) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_USER, user).await?;
        Ok(())
    }

    /// Retrieves the authenticated user from the session.
    ///
    /// # Returns
    /// - `Ok(Some(user))` - User is logged in
    /// - `Ok(None)` - No user in session (not logged in)
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_user(&self) -> Result<Option<SessionUser>, AppError> {
        Ok(self.session.get::<SessionUser>(SESSION_AUTH_USER).await?)
    }

    /// Stores the user's OAuth tokens, replacing any previous ones.
    pub async fn set_tokens(&self, tokens: &SessionTokens) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_TOKENS, tokens).await?;
        Ok(())
    }

    /// Retrieves the user's OAuth tokens.
    ///
    /// # Returns
    /// - `Ok(Some(tokens))` - Tokens from the last login or refresh
    /// - `Ok(None)` - No tokens in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_tokens(&self) -> Result<Option<SessionTokens>, AppError> {
        Ok(self.session.get::<SessionTokens>(SESSION_AUTH_TOKENS).await?)
    }

    /// Clears all data from the session.
    ///
    /// Used during logout and after a failed token refresh.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// OAuth `state` parameter of a pending login.
///
/// Stored by `login` and consumed by `callback`, so a state value is accepted at
/// most once.
pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Remembers the state sent to Discord, replacing any pending one.
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Removes and returns the pending state.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - A login was pending
    /// - `Ok(None)` - No login pending, or the state was already used
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.remove(SESSION_AUTH_CSRF_TOKEN).await?)
    }
}
