use serenity::all::Permissions;

use crate::server::{
    error::{config::ConfigError, AppError},
    service::discord::DISCORD_API_URL,
};

const DISCORD_AUTH_URL: &str = "https://discord.com/oauth2/authorize";
const DISCORD_TOKEN_URL: &str = "https://discord.com/api/oauth2/token";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_APP_ENV: &str = "development";

/// OAuth callback path appended to `APP_URL`.
pub const CALLBACK_PATH: &str = "/api/auth/callback";

/// Dashboard configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite URL of the default session store, only required by `Dashboard::start`.
    pub database_url: Option<String>,

    pub discord_client_id: String,
    pub discord_client_secret: String,
    pub discord_redirect_url: String,

    pub discord_auth_url: String,
    pub discord_token_url: String,
    pub discord_api_url: String,

    /// Public base URL of the dashboard, without trailing slash.
    pub app_url: String,
    pub host: String,
    pub port: u16,
    /// `APP_ENV=production`, enables secure session cookies.
    pub production: bool,

    /// Permissions a guild must grant the user to be listed.
    pub guild_permissions: Permissions,
}

impl Config {
    /// Loads configuration from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let app_url = required("APP_URL")?.trim_end_matches('/').to_string();

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvVar {
                name: "PORT".to_string(),
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let guild_permissions = match lookup("DISCORD_GUILD_PERMISSIONS") {
            Some(value) => value
                .parse::<u64>()
                .map(Permissions::from_bits_truncate)
                .map_err(|_| ConfigError::InvalidEnvVar {
                    name: "DISCORD_GUILD_PERMISSIONS".to_string(),
                    value,
                })?,
            None => Permissions::MANAGE_GUILD,
        };

        let app_env = lookup("APP_ENV").unwrap_or_else(|| DEFAULT_APP_ENV.to_string());

        Ok(Self {
            database_url: lookup("DATABASE_URL"),
            discord_client_id: required("DISCORD_CLIENT_ID")?,
            discord_client_secret: required("DISCORD_CLIENT_SECRET")?,
            discord_redirect_url: format!("{}{}", app_url, CALLBACK_PATH),
            discord_auth_url: DISCORD_AUTH_URL.to_string(),
            discord_token_url: DISCORD_TOKEN_URL.to_string(),
            discord_api_url: DISCORD_API_URL.to_string(),
            app_url,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            production: app_env.eq_ignore_ascii_case("production"),
            guild_permissions,
        })
    }
}
