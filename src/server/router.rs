//! Route table and generated API documentation.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, guild, options},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Discord Dashboard API", description = "Discord login, guild listing and bot options"),
    tags(
        (name = "auth", description = "Discord OAuth2 login and session"),
        (name = "guild", description = "Guilds the user can manage"),
        (name = "options", description = "User and guild scoped bot options")
    )
)]
struct ApiDoc;

/// Builds the API router with Swagger UI at `/documentation`.
///
/// The OpenAPI document is served at `/api-docs/openapi.json`. Session and tracing
/// layers are added by the caller.
pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::callback))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_user))
        .routes(routes!(guild::get_guilds))
        .routes(routes!(options::get_user_options, options::update_user_options))
        .routes(routes!(options::get_guild_options, options::update_guild_options))
        .split_for_parts();

    router.merge(SwaggerUi::new("/documentation").url("/api-docs/openapi.json", api))
}
