use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::collections::HashMap;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        options::{GroupResponseDto, GroupUpdateDto, OptionErrorDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::options::{callback::OptionContext, update::UpdateGroupParam},
        service::options::OptionsService,
        state::AppState,
        util::parse::parse_guild_id,
    },
};

pub static OPTIONS_TAG: &str = "options";

/// GET /api/options/user - User options visible to the logged in user
#[utoipa::path(
    get,
    path = "/api/options/user",
    tag = OPTIONS_TAG,
    responses(
        (status = 200, description = "Visible groups with their options and values", body = Vec<GroupResponseDto>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_options(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&session).require().await?;

    let groups = OptionsService::new(state.options.user())
        .resolve(OptionContext::user(user.user_id()))
        .await;

    let dto: Vec<GroupResponseDto> = groups.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// POST /api/options/user - Update user options
///
/// The login is checked before the body is parsed, so anonymous requests get 401 even
/// with a malformed body. Always answers 200 once authenticated; the body maps group ids to the updates that were not applied
/// and is empty when every update succeeded.
#[utoipa::path(
    post,
    path = "/api/options/user",
    tag = OPTIONS_TAG,
    request_body = Vec<GroupUpdateDto>,
    responses(
        (status = 200, description = "Failed updates keyed by group id", body = HashMap<String, Vec<OptionErrorDto>>),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user_options(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<Vec<GroupUpdateDto>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&session).require().await?;
    let Json(payload) = payload?;

    let updates = payload.into_iter().map(UpdateGroupParam::from).collect();
    let report = OptionsService::new(state.options.user())
        .apply(OptionContext::user(user.user_id()), updates)
        .await;

    Ok((StatusCode::OK, Json(report.into_dto())))
}

/// GET /api/options/guild/{guild_id} - Guild options visible to the logged in user
#[utoipa::path(
    get,
    path = "/api/options/guild/{guild_id}",
    tag = OPTIONS_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Visible groups with their options and values", body = Vec<GroupResponseDto>),
        (status = 400, description = "Invalid guild ID", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_guild_options(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&session).require().await?;
    let guild_id = parse_guild_id(&guild_id)?;

    let groups = OptionsService::new(state.options.guild())
        .resolve(OptionContext::guild(user.user_id(), guild_id))
        .await;

    let dto: Vec<GroupResponseDto> = groups.into_iter().map(|g| g.into_dto()).collect();

    Ok((StatusCode::OK, Json(dto)))
}

/// POST /api/options/guild/{guild_id} - Update guild options
#[utoipa::path(
    post,
    path = "/api/options/guild/{guild_id}",
    tag = OPTIONS_TAG,
    params(
        ("guild_id" = String, Path, description = "Discord guild ID")
    ),
    request_body = Vec<GroupUpdateDto>,
    responses(
        (status = 200, description = "Failed updates keyed by group id", body = HashMap<String, Vec<OptionErrorDto>>),
        (status = 400, description = "Invalid guild ID", body = ErrorDto),
        (status = 401, description = "User not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_guild_options(
    State(state): State<AppState>,
    session: Session,
    Path(guild_id): Path<String>,
    payload: Result<Json<Vec<GroupUpdateDto>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&session).require().await?;
    let guild_id = parse_guild_id(&guild_id)?;
    let Json(payload) = payload?;

    let updates = payload.into_iter().map(UpdateGroupParam::from).collect();
    let report = OptionsService::new(state.options.guild())
        .apply(OptionContext::guild(user.user_id(), guild_id), updates)
        .await;

    Ok((StatusCode::OK, Json(report.into_dto())))
}
