use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, guild::GuildDto},
    server::{error::AppError, middleware::auth::AuthGuard, state::AppState},
};

pub static GUILD_TAG: &str = "guild";

/// GET /api/guilds - Guilds the user can manage
///
/// Returns the user's Discord guilds in which they hold the configured permissions
/// (`MANAGE_GUILD` by default). Administrators qualify for every guild.
#[utoipa::path(
    get,
    path = "/api/guilds",
    tag = GUILD_TAG,
    responses(
        (status = 200, description = "Manageable guilds", body = Vec<GuildDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 429, description = "Discord rate limit reached", body = ErrorDto),
        (status = 502, description = "Discord request failed", body = ErrorDto)
    ),
)]
pub async fn get_guilds(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let (_, tokens) = AuthGuard::new(&session).require_tokens().await?;

    let guilds = state
        .guild_service()
        .list_manageable(&tokens.access_token)
        .await?;

    let dto: Vec<GuildDto> = guilds.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}
