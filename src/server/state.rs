//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - HTTP client for Discord API requests
//! - OAuth2 client for Discord authentication
//! - The registered user and guild option groups
//! - Discord response cache

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};
use serenity::all::Permissions;
use std::sync::Arc;

use crate::server::{
    model::options::registry::OptionRegistry,
    service::{
        auth::AuthService,
        discord::{cache::DiscordCache, DiscordApiService},
        guild::GuildService,
    },
};

/// Type alias for the OAuth2 client configured for Discord authentication.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Application state containing shared resources and dependencies.
///
/// This struct holds all the shared state that needs to be accessible across
/// request handlers. It is initialized once during server startup and then
/// cloned for each incoming request via Axum's state extraction.
///
/// All fields are cheap to clone:
/// - `reqwest::Client` uses an `Arc` internally
/// - `OAuth2Client` is designed to be cloned
/// - `Arc<OptionRegistry>` shares the immutable option tree
/// - `DiscordCache` shares its entries through an `Arc`
#[derive(Clone)]
pub struct AppState {
    /// HTTP client for making external API requests.
    ///
    /// Configured with security settings (no redirects) to prevent SSRF
    /// vulnerabilities. Used for Discord API calls and OAuth token requests.
    pub http_client: reqwest::Client,

    /// OAuth2 client for Discord authentication flow.
    ///
    /// Handles the OAuth2 authentication flow including generating login URLs,
    /// exchanging authorization codes and refreshing access tokens.
    pub oauth_client: OAuth2Client,

    /// User and guild option groups registered by the bot author.
    pub options: Arc<OptionRegistry>,

    /// Cache of Discord responses keyed by URL and token.
    pub discord_cache: DiscordCache,

    /// Discord REST API base URL.
    pub discord_api_url: String,

    /// Permissions a guild must grant the user to appear in the guild list.
    pub guild_permissions: Permissions,
}

impl AppState {
    /// Discord API access for the current request.
    pub fn discord_service(&self) -> DiscordApiService<'_> {
        DiscordApiService::new(&self.http_client, &self.discord_cache, &self.discord_api_url)
    }

    pub fn auth_service(&self) -> AuthService<'_> {
        AuthService::new(&self.http_client, &self.oauth_client, self.discord_service())
    }

    pub fn guild_service(&self) -> GuildService<'_> {
        GuildService::new(self.discord_service(), self.guild_permissions)
    }
}

#[cfg(test)]
impl AppState {
    /// State for handler tests, Discord requests go to `discord_api_url`.
    pub(crate) fn for_test(options: OptionRegistry, discord_api_url: &str) -> Self {
        use crate::server::{config::Config, startup};

        let config = Config::from_vars(|name| match name {
            "DISCORD_CLIENT_ID" => Some("id".to_string()),
            "DISCORD_CLIENT_SECRET" => Some("secret".to_string()),
            "APP_URL" => Some("http://localhost:3000".to_string()),
            _ => None,
        })
        .expect("valid test config");

        Self {
            http_client: reqwest::Client::new(),
            oauth_client: startup::setup_oauth_client(&config).expect("valid oauth urls"),
            options: Arc::new(options),
            discord_cache: DiscordCache::new(),
            discord_api_url: discord_api_url.to_string(),
            guild_permissions: config.guild_permissions,
        }
    }
}
