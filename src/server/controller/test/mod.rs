use axum::{
    body::{to_bytes, Body},
    extract::{rejection::JsonRejection, FromRequest, Path, Query, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Duration, Utc};
use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use serde_json::{json, Value};
use test_utils::{builder::TestBuilder, fixture, store::MemoryStore};
use tower_sessions::Session;

use crate::{
    model::options::{GroupUpdateDto, OptionUpdateDto},
    server::{
        error::AppError,
        middleware::session::{AuthSession, CsrfSession},
        model::{
            options::{
                access::{AccessControlResult, OptionSetResult},
                group::{FormGroup, FormGroupBuilder},
                option::FormOptionBuilder,
                registry::OptionRegistry,
            },
            user::{SessionTokens, SessionUser},
        },
        service::discord::DISCORD_API_URL,
        state::AppState,
    },
};

mod options;

const USER_ID: u64 = 42;

fn session_user() -> SessionUser {
    SessionUser {
        id: USER_ID,
        name: "tester".to_string(),
        global_name: Some("Tester".to_string()),
        avatar: None,
    }
}

async fn log_in(session: &Session) -> Result<(), AppError> {
    let auth_session = AuthSession::new(session);
    auth_session.set_user(&session_user()).await?;
    auth_session
        .set_tokens(&SessionTokens {
            access_token: "access".to_string(),
            refresh_token: Some("refresh".to_string()),
            expires_at: Utc::now() + Duration::days(7),
        })
        .await?;

    Ok(())
}

/// Reads a handler response body as JSON.
async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");

    serde_json::from_slice(&bytes).expect("JSON body")
}

/// A text option keyed in `store` by the guild it is read for, or `user` outside guilds.
fn scoped_option(id: &'static str, store: &MemoryStore) -> FormOptionBuilder {
    let get_store = store.clone();
    let set_store = store.clone();

    FormOptionBuilder::text_input()
        .id(id)
        .meta(json!({ "label": id }))
        .on_request(move |ctx| {
            let key = scope_key(id, ctx.guild_id.map(|g| g.get()));
            let value = get_store.get(&key);
            async move { Ok(value) }
        })
        .on_update(move |ctx, value| {
            let key = scope_key(id, ctx.guild_id.map(|g| g.get()));
            set_store.set(key, value);
            async { Ok(OptionSetResult::ok()) }
        })
}

fn scope_key(id: &str, guild_id: Option<u64>) -> String {
    match guild_id {
        Some(guild_id) => format!("{}:{}", guild_id, id),
        None => format!("user:{}", id),
    }
}

/// User namespace with an editable `profile` group and a locked `premium` group,
/// guild namespace with a single `general` group.
fn registry(store: &MemoryStore) -> OptionRegistry {
    let profile = FormGroupBuilder::new()
        .id("profile")
        .option(scoped_option("nickname", store).build().unwrap())
        .build()
        .unwrap();

    let premium = FormGroupBuilder::new()
        .id("premium")
        .option(scoped_option("badge", store).build().unwrap())
        .can_access(|_| async { Ok(AccessControlResult::disallowed_with(true, "Premium only")) })
        .build()
        .unwrap();

    let general: FormGroup = FormGroupBuilder::new()
        .id("general")
        .option(scoped_option("prefix", store).build().unwrap())
        .build()
        .unwrap();

    OptionRegistry::new(vec![profile, premium], vec![general]).unwrap()
}

fn body(groups: Vec<GroupUpdateDto>) -> Result<Json<Vec<GroupUpdateDto>>, JsonRejection> {
    Ok(Json(groups))
}

/// Runs the JSON extractor on a raw request body, as axum does before calling a handler.
async fn raw_body(raw: &'static str) -> Result<Json<Vec<GroupUpdateDto>>, JsonRejection> {
    let request = Request::builder()
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .expect("valid request");

    Json::<Vec<GroupUpdateDto>>::from_request(request, &()).await
}

fn update(group_id: &str, option_id: &str, value: Value) -> GroupUpdateDto {
    GroupUpdateDto {
        id: group_id.to_string(),
        options: vec![OptionUpdateDto {
            id: option_id.to_string(),
            value,
        }],
    }
}

/// Serves `router` on an ephemeral local port standing in for Discord.
async fn spawn_discord(router: Router) -> Result<String, AppError> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://{}", addr))
}

/// State whose OAuth token requests and Discord API calls go to `base_url`.
fn state_with_discord(options: OptionRegistry, base_url: &str) -> AppState {
    let mut state = AppState::for_test(options, base_url);

    state.oauth_client = oauth2::basic::BasicClient::new(ClientId::new("id".to_string()))
        .set_client_secret(ClientSecret::new("secret".to_string()))
        .set_auth_uri(AuthUrl::new(format!("{}/oauth2/authorize", base_url)).unwrap())
        .set_token_uri(TokenUrl::new(format!("{}/oauth2/token", base_url)).unwrap())
        .set_redirect_uri(
            RedirectUrl::new("http://localhost:3000/api/auth/callback".to_string()).unwrap(),
        );

    state
}
