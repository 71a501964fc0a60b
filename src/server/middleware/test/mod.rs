use axum::{routing::get, routing::post, Json, Router};
use chrono::{Duration, Utc};
use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, TokenUrl};
use serde_json::json;
use test_utils::{builder::TestBuilder, fixture};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::AuthGuard,
        refresh::refresh_session,
        session::{AuthSession, CsrfSession},
    },
    model::{
        options::registry::OptionRegistry,
        user::{SessionTokens, SessionUser},
    },
    service::discord::DISCORD_API_URL,
    state::AppState,
};


fn session_user() -> SessionUser {
    SessionUser {
        id: 42,
        name: "tester".to_string(),
        global_name: None,
        avatar: None,
    }
}

fn tokens_expiring_in(lifetime: Duration, refresh_token: Option<&str>) -> SessionTokens {
    SessionTokens {
        access_token: "access".to_string(),
        refresh_token: refresh_token.map(str::to_string),
        expires_at: Utc::now() + lifetime,
    }
}

/// Serves a fake Discord token endpoint and `/users/@me` on a local port.
///
/// # Returns
/// - `Ok(String)` - Base URL of the fake API
async fn spawn_discord() -> Result<String, AppError> {
    let router = Router::new()
        .route(
            "/oauth2/token",
            post(|| async {
                Json(json!({
                    "access_token": "refreshed",
                    "token_type": "Bearer",
                    "expires_in": 604800,
                    "refresh_token": "rotated",
                    "scope": "identify guilds"
                }))
            }),
        )
        .route(
            "/users/@me",
            get(|| async { Json(fixture::discord::user()) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://{}", addr))
}

/// State whose OAuth token requests and Discord API calls go to `base_url`.
fn state_with_discord(base_url: &str) -> AppState {
    let mut state = AppState::for_test(OptionRegistry::default(), base_url);

    state.oauth_client = oauth2::basic::BasicClient::new(ClientId::new("id".to_string()))
        .set_client_secret(ClientSecret::new("secret".to_string()))
        .set_auth_uri(AuthUrl::new(format!("{}/oauth2/authorize", base_url)).unwrap())
        .set_token_uri(TokenUrl::new(format!("{}/oauth2/token", base_url)).unwrap())
        .set_redirect_uri(
            RedirectUrl::new("http://localhost:3000/api/auth/callback".to_string()).unwrap(),
        );

    state
}
