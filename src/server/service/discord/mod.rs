//! Discord REST calls made with a logged in user's OAuth token.
//!
//! - `cache` - Rate-limit aware response cache shared through `AppState`

pub mod cache;

#[cfg(test)]
mod test;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serenity::all::User as DiscordUser;

use crate::server::{
    error::{discord::DiscordError, AppError},
    model::guild::PartialGuild,
    service::discord::cache::{DiscordCache, RateLimit},
};

/// Base URL of Discord's v10 REST API.
pub const DISCORD_API_URL: &str = "https://discord.com/api/v10";

/// Service for Discord API requests authorized with a user's bearer token.
pub struct DiscordApiService<'a> {
    /// HTTP client for Discord API requests.
    http_client: &'a reqwest::Client,
    /// Response cache shared across requests.
    cache: &'a DiscordCache,
    /// API base URL, `DISCORD_API_URL` outside of tests.
    api_url: &'a str,
}

impl<'a> DiscordApiService<'a> {
    /// Creates a new DiscordApiService instance.
    ///
    /// # Arguments
    /// - `http_client` - Reference to the HTTP client
    /// - `cache` - Reference to the shared response cache
    /// - `api_url` - Discord API base URL without trailing slash
    ///
    /// # Returns
    /// - `DiscordApiService` - New service instance
    pub fn new(http_client: &'a reqwest::Client, cache: &'a DiscordCache, api_url: &'a str) -> Self {
        Self {
            http_client,
            cache,
            api_url,
        }
    }

    /// Retrieves the authenticated user's Discord profile.
    ///
    /// Always hits Discord, login needs the current profile.
    ///
    /// # Arguments
    /// - `access_token` - OAuth2 access token of the user
    ///
    /// # Returns
    /// - `Ok(DiscordUser)` - The user behind the token
    /// - `Err(AppError::DiscordErr)` - Discord answered with a non-success status
    /// - `Err(AppError::ReqwestErr)` - Request failed or the body could not be parsed
    pub async fn fetch_user(&self, access_token: &str) -> Result<DiscordUser, AppError> {
        let user = self
            .send(&self.url("/users/@me"), access_token)
            .await?
            .json::<DiscordUser>()
            .await?;

        Ok(user)
    }

    /// Retrieves the guilds the user is a member of, including their permissions.
    ///
    /// Served from the cache while Discord's rate-limit bucket for the previous
    /// response has not reset.
    ///
    /// # Arguments
    /// - `access_token` - OAuth2 access token of the user
    ///
    /// # Returns
    /// - `Ok(Vec<PartialGuild>)` - Guilds of the user
    /// - `Err(AppError::DiscordErr)` - Rate limited (429) or other non-success status
    /// - `Err(AppError::ReqwestErr)` - Request failed
    pub async fn fetch_user_guilds(&self, access_token: &str) -> Result<Vec<PartialGuild>, AppError> {
        self.get_cached("/users/@me/guilds", access_token).await
    }

    async fn get_cached<T: DeserializeOwned>(&self, path: &str, access_token: &str) -> Result<T, AppError> {
        let url = self.url(path);

        let body = match self.cache.get(&url, access_token).await {
            Some(body) => {
                tracing::debug!("Serving {} from cache", path);
                body
            }
            None => {
                let response = self.send(&url, access_token).await?;
                let rate_limit = RateLimit::from_headers(response.headers());
                let body = response.json::<Value>().await?;

                if let Some(rate_limit) = rate_limit {
                    self.cache
                        .insert(&url, access_token, body.clone(), rate_limit)
                        .await;
                }

                body
            }
        };

        serde_json::from_value(body).map_err(|e| {
            AppError::InternalError(format!("Unexpected Discord response for {}: {}", path, e))
        })
    }

    async fn send(&self, url: &str, access_token: &str) -> Result<reqwest::Response, AppError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DiscordError::RateLimited.into());
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DiscordError::RequestFailed {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}
