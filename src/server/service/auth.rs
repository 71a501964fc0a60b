use chrono::{Duration, Utc};
use oauth2::{
    basic::BasicTokenType, AuthorizationCode, CsrfToken, EmptyExtraTokenFields, RefreshToken,
    Scope, StandardTokenResponse, TokenResponse,
};
use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::{SessionTokens, SessionUser},
    service::discord::DiscordApiService,
    state::OAuth2Client,
};

/// Lifetime assumed for access tokens when Discord omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 7;

/// OAuth2 scopes requested at login.
const LOGIN_SCOPES: [&str; 3] = ["identify", "email", "guilds"];

/// Service for Discord OAuth2 authentication.
///
/// Provides methods for the Discord OAuth2 login flow and token refresh. The resulting
/// user and tokens are stored in the session by the controller layer.
pub struct AuthService<'a> {
    /// HTTP client for OAuth token requests.
    http_client: &'a reqwest::Client,
    /// OAuth2 client for Discord authentication flow.
    oauth_client: &'a OAuth2Client,
    /// Discord API access for fetching the logged in user.
    discord: DiscordApiService<'a>,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `http_client` - Reference to the HTTP client for token requests
    /// - `oauth_client` - Reference to the configured OAuth2 client
    /// - `discord` - Discord API access used after the code exchange
    ///
    /// # Returns
    /// - `AuthService` - New service instance
    pub fn new(
        http_client: &'a reqwest::Client,
        oauth_client: &'a OAuth2Client,
        discord: DiscordApiService<'a>,
    ) -> Self {
        Self {
            http_client,
            oauth_client,
            discord,
        }
    }

    /// Generates a Discord OAuth2 login URL with CSRF protection.
    ///
    /// Requests the `identify`, `email` and `guilds` scopes. Returns both the URL and the
    /// CSRF token the callback is validated against.
    ///
    /// # Returns
    /// - `(Url, CsrfToken)` - Tuple containing the authorization URL and CSRF state token
    pub fn login_url(&self) -> (Url, CsrfToken) {
        self.oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(LOGIN_SCOPES.iter().map(|scope| Scope::new(scope.to_string())))
            .url()
    }

    /// Handles the OAuth2 callback.
    ///
    /// Exchanges the authorization code for tokens and fetches the user's Discord profile.
    ///
    /// # Arguments
    /// - `authorization_code` - OAuth2 authorization code from Discord callback
    ///
    /// # Returns
    /// - `Ok((SessionUser, SessionTokens))` - Authenticated user and their tokens
    /// - `Err(AppError::AuthErr)` - OAuth2 token exchange failed
    /// - `Err(AppError::DiscordErr)` - Failed to fetch the user from Discord
    pub async fn callback(
        &self,
        authorization_code: String,
    ) -> Result<(SessionUser, SessionTokens), AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;
        let tokens = session_tokens(&token);

        let user = self.discord.fetch_user(&tokens.access_token).await?;

        tracing::info!("User {} logged in", user.name);

        Ok((SessionUser::from_discord(user), tokens))
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Discord may rotate the refresh token; when it does not, the previous one is kept.
    ///
    /// # Arguments
    /// - `tokens` - Tokens currently stored in the session
    ///
    /// # Returns
    /// - `Ok(SessionTokens)` - Fresh tokens
    /// - `Err(AppError::AuthErr(MissingTokens))` - No refresh token was issued
    /// - `Err(AppError::AuthErr(TokenExchange))` - Discord rejected the refresh token
    pub async fn refresh(&self, tokens: &SessionTokens) -> Result<SessionTokens, AppError> {
        let Some(refresh_token) = tokens.refresh_token.clone() else {
            return Err(AuthError::MissingTokens.into());
        };

        let token = self
            .oauth_client
            .exchange_refresh_token(&RefreshToken::new(refresh_token.clone()))
            .request_async(self.http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let mut refreshed = session_tokens(&token);
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = Some(refresh_token);
        }

        Ok(refreshed)
    }

    /// Fetches the profile behind an access token.
    ///
    /// Used after a refresh to keep the session user current.
    pub async fn fetch_discord_user(&self, access_token: &str) -> Result<SessionUser, AppError> {
        let user = self.discord.fetch_user(access_token).await?;

        Ok(SessionUser::from_discord(user))
    }
}

fn session_tokens(token: &StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>) -> SessionTokens {
    let lifetime = token
        .expires_in()
        .and_then(|expires_in| Duration::from_std(expires_in).ok())
        .unwrap_or_else(|| Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS));

    SessionTokens {
        access_token: token.access_token().secret().clone(),
        refresh_token: token.refresh_token().map(|t| t.secret().clone()),
        expires_at: Utc::now() + lifetime,
    }
}
