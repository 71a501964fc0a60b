//! Initialization of logging, the session store and the HTTP/OAuth clients.

use oauth2::{basic::BasicClient, AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use sea_orm::DatabaseConnection;
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    state::OAuth2Client,
};

/// Sessions expire after this many days without a request.
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise production logs at `info` and development
/// at `debug`. Calling this twice is harmless, the second call is ignored.
///
/// # Arguments
/// - `production` - Whether the dashboard runs with `APP_ENV=production`
pub fn init_tracing(production: bool) {
    let default_level = if production { "info" } else { "debug" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Connects to the Sqlite database backing the default session store.
///
/// # Arguments
/// - `database_url` - SQLite connection string, e.g. `sqlite://dashboard.db?mode=rwc`
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database
/// - `Err(AppError::DbErr)` - Failed to connect to database
pub async fn connect_to_database(database_url: &str) -> Result<DatabaseConnection, AppError> {
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Ok(db)
}

/// Creates the SQLite session store and runs its migration.
///
/// # Arguments
/// - `db` - Database connection whose pool stores the sessions
///
/// # Returns
/// - `Ok(SqliteStore)` - Store with its table created
/// - `Err(AppError::DbErr)` - Failed to create the session table
pub async fn connect_to_session(db: &DatabaseConnection) -> Result<SqliteStore, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());

    session_store
        .migrate()
        .await
        .map_err(|e| sea_orm::DbErr::Custom(e.to_string()))?;

    Ok(session_store)
}

/// Wraps a session store in the session layer used by the router.
///
/// # Arguments
/// - `store` - Any tower-sessions store
/// - `production` - Secure cookies are only sent over HTTPS
///
/// # Returns
/// - `SessionManagerLayer<S>` - Layer with a 7 day inactivity expiry
pub fn session_layer<S>(store: S, production: bool) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_secure(production)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS)))
}

/// Creates the HTTP client for Discord requests.
///
/// Redirects are disabled to prevent SSRF through redirect responses, which is also
/// required by the oauth2 crate for token requests.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - Failed to initialize the TLS backend
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// Creates the Discord OAuth2 client from configuration.
///
/// # Arguments
/// - `config` - Application configuration with client credentials and URLs
///
/// # Returns
/// - `Ok(OAuth2Client)` - Client with authorize, token and redirect URLs set
/// - `Err(AppError::ConfigErr)` - One of the URLs is not a valid URL
pub fn setup_oauth_client(config: &Config) -> Result<OAuth2Client, AppError> {
    let invalid = |name: &str, value: &str| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
    };

    let auth_url = AuthUrl::new(config.discord_auth_url.clone())
        .map_err(|_| invalid("DISCORD_AUTH_URL", &config.discord_auth_url))?;
    let token_url = TokenUrl::new(config.discord_token_url.clone())
        .map_err(|_| invalid("DISCORD_TOKEN_URL", &config.discord_token_url))?;
    let redirect_url = RedirectUrl::new(config.discord_redirect_url.clone())
        .map_err(|_| invalid("APP_URL", &config.app_url))?;

    let client = BasicClient::new(ClientId::new(config.discord_client_id.clone()))
        .set_client_secret(ClientSecret::new(config.discord_client_secret.clone()))
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(redirect_url);

    Ok(client)
}
