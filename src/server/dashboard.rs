//! Author-facing entry point tying configuration, options and the server together.

use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    middleware::refresh::refresh_tokens,
    model::options::{group::FormGroup, registry::OptionRegistry},
    router, startup,
    service::discord::cache::DiscordCache,
    state::AppState,
    theme::Theme,
};

/// A Discord bot dashboard.
///
/// # Example
///
/// ```rust,ignore
/// let nickname = FormOptionBuilder::text_input()
///     .id("nickname")
///     .on_request(|ctx| async move { Ok(store.get(ctx.user_id)) })
///     .on_update(|ctx, value| async move { store.set(ctx.user_id, value); Ok(OptionSetResult::ok()) })
///     .build()?;
///
/// Dashboard::new(Config::from_env()?)
///     .set_user_options(vec![FormGroupBuilder::new().id("profile").option(nickname).build()?])
///     .start()
///     .await?;
/// ```
pub struct Dashboard {
    config: Config,
    user_groups: Vec<FormGroup>,
    guild_groups: Vec<FormGroup>,
    theme: Option<Arc<dyn Theme>>,
}

impl Dashboard {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            user_groups: Vec::new(),
            guild_groups: Vec::new(),
            theme: None,
        }
    }

    /// Sets the groups shown under `/api/options/user`, replacing earlier ones.
    pub fn set_user_options(mut self, groups: Vec<FormGroup>) -> Self {
        self.user_groups = groups;
        self
    }

    /// Sets the groups shown under `/api/options/guild/{guild_id}`, replacing earlier ones.
    pub fn set_guild_options(mut self, groups: Vec<FormGroup>) -> Self {
        self.guild_groups = groups;
        self
    }

    pub fn set_theme(mut self, theme: impl Theme + 'static) -> Self {
        self.theme = Some(Arc::new(theme));
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates the option groups and creates the shared application state.
    ///
    /// # Returns
    /// - `Ok(AppState)` - State ready to be handed to `router`
    /// - `Err(AppError::BuildErr)` - Duplicate group ids in a namespace
    /// - `Err(AppError::ConfigErr)` - Invalid OAuth URLs
    /// - `Err(AppError::ReqwestErr)` - HTTP client could not be created
    pub fn state(&self) -> Result<AppState, AppError> {
        let options = OptionRegistry::new(self.user_groups.clone(), self.guild_groups.clone())?;

        Ok(AppState {
            http_client: startup::setup_reqwest_client()?,
            oauth_client: startup::setup_oauth_client(&self.config)?,
            options: Arc::new(options),
            discord_cache: DiscordCache::new(),
            discord_api_url: self.config.discord_api_url.clone(),
            guild_permissions: self.config.guild_permissions,
        })
    }

    /// Builds the complete router: API, documentation, theme and middleware.
    ///
    /// # Arguments
    /// - `state` - State from `state()`
    /// - `session_store` - Store holding the login sessions
    ///
    /// # Returns
    /// - `Router` - Router ready to be served
    pub fn router<S>(&self, state: AppState, session_store: S) -> Router
    where
        S: SessionStore + Clone,
    {
        let mut router = router::router();

        if let Some(theme) = &self.theme {
            tracing::info!("Mounting theme {}", theme.name());
            router = theme.inject(router, &self.config);
        }

        router
            .layer(middleware::from_fn_with_state(state.clone(), refresh_tokens))
            .layer(startup::session_layer(session_store, self.config.production))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Starts the dashboard with the SQLite session store at `DATABASE_URL`.
    ///
    /// # Returns
    /// - `Ok(())` - Server shut down
    /// - `Err(AppError::ConfigErr)` - `DATABASE_URL` is not set
    /// - `Err(AppError)` - Startup or serving failed
    pub async fn start(self) -> Result<(), AppError> {
        let Some(database_url) = self.config.database_url.clone() else {
            return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string()).into());
        };

        let db = startup::connect_to_database(&database_url).await?;
        let session_store = startup::connect_to_session(&db).await?;

        self.start_with_store(session_store).await
    }

    /// Starts the dashboard with a custom session store.
    ///
    /// # Arguments
    /// - `session_store` - Any tower-sessions store, e.g. `tower_sessions::MemoryStore`
    ///
    /// # Returns
    /// - `Ok(())` - Server shut down
    /// - `Err(AppError)` - Invalid options, configuration or a socket error
    pub async fn start_with_store<S>(self, session_store: S) -> Result<(), AppError>
    where
        S: SessionStore + Clone,
    {
        startup::init_tracing(self.config.production);

        let state = self.state()?;
        let router = self.router(state, session_store);

        let address = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&address).await?;

        tracing::info!("Dashboard listening on http://{}", address);
        tracing::info!("API documentation at {}/documentation", self.config.app_url);

        axum::serve(listener, router).await?;

        Ok(())
    }
}
