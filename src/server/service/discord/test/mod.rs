use crate::server::{
    error::{discord::DiscordError, AppError},
    service::discord::{cache::DiscordCache, DiscordApiService},
};
use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use test_utils::fixture;


/// Serves `router` on an ephemeral local port standing in for Discord.
///
/// # Returns
/// - `Ok(String)` - Base URL of the fake API
async fn spawn_discord(router: Router) -> Result<String, AppError> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://{}", addr))
}

/// Fake `/users/@me/guilds` counting its hits, optionally sending a reset window.
fn guilds_route(hits: Arc<AtomicUsize>, reset_after: Option<&'static str>) -> Router {
    Router::new().route(
        "/users/@me/guilds",
        get(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);

                let mut headers = axum::http::HeaderMap::new();
                if let Some(reset_after) = reset_after {
                    headers.insert(
                        "x-ratelimit-reset-after",
                        axum::http::HeaderValue::from_static(reset_after),
                    );
                }

                (
                    headers,
                    Json(fixture::discord::guilds([
                        fixture::discord::guild(),
                        fixture::discord::guild_builder().id("2").build(),
                    ])),
                )
            }
        }),
    )
}

fn status_route(path: &str, status: StatusCode) -> Router {
    Router::new().route(path, get(move || async move { (status, Json(Value::Null)) }))
}
