//! Extension point for frontends rendering the dashboard API.

use axum::Router;

use crate::server::{config::Config, state::AppState};

/// A frontend mounted next to the dashboard API.
///
/// Themes usually serve static assets and an index page that talks to the `/api`
/// routes. Without a theme the dashboard only serves the API and its documentation.
pub trait Theme: Send + Sync {
    /// Name used in startup logs.
    fn name(&self) -> &str;

    /// Adds the theme's routes to the dashboard router.
    ///
    /// Called once while the dashboard starts, before session and tracing layers are
    /// applied, so theme routes share the API's session.
    ///
    /// # Arguments
    /// - `router` - Router holding the API routes
    /// - `config` - Dashboard configuration, e.g. for `app_url`
    ///
    /// # Returns
    /// - `Router<AppState>` - Router with the theme's routes merged in
    fn inject(&self, router: Router<AppState>, config: &Config) -> Router<AppState>;
}
