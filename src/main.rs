//! Demo dashboard with a few user and guild options kept in memory.
//!
//! Reads its configuration from the environment (see `Config`). Sessions use SQLite
//! when `DATABASE_URL` is set and an in-memory store otherwise.

use discord_dashboard::{
    AccessControlResult, AppError, CallbackResult, Config, Dashboard, FormGroup, FormGroupBuilder,
    FormOptionBuilder, OptionContext, OptionSetResult,
};
use serde_json::{json, Value};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Longest accepted command prefix.
const MAX_PREFIX_LEN: usize = 5;

/// Option values keyed by scope (user or guild id) and option id.
#[derive(Clone, Default)]
struct DemoStore {
    values: Arc<RwLock<HashMap<(u64, String), Value>>>,
}

impl DemoStore {
    async fn get(&self, scope: u64, id: &str) -> Value {
        self.values
            .read()
            .await
            .get(&(scope, id.to_string()))
            .cloned()
            .unwrap_or(Value::Null)
    }

    async fn set(&self, scope: u64, id: &str, value: Value) {
        self.values.write().await.insert((scope, id.to_string()), value);
    }
}

fn scope(ctx: &OptionContext) -> u64 {
    ctx.guild_id.map_or(ctx.user_id.get(), |guild| guild.get())
}

/// A text option stored in `store` under `id`.
fn text_option(store: &DemoStore, id: &'static str, label: &str) -> FormOptionBuilder {
    let get_store = store.clone();
    let set_store = store.clone();

    FormOptionBuilder::text_input()
        .id(id)
        .meta(json!({ "label": label }))
        .on_request(move |ctx| {
            let store = get_store.clone();
            async move { Ok(store.get(scope(&ctx), id).await) }
        })
        .on_update(move |ctx, value| {
            let store = set_store.clone();
            async move {
                store.set(scope(&ctx), id, value).await;
                Ok(OptionSetResult::ok())
            }
        })
}

fn user_groups(store: &DemoStore) -> Result<Vec<FormGroup>, AppError> {
    let profile = FormGroupBuilder::new()
        .id("profile")
        .meta(json!({ "title": "Profile" }))
        .option(text_option(store, "nickname", "Nickname").build()?)
        .option(text_option(store, "bio", "About me").build()?)
        .build()?;

    Ok(vec![profile])
}

fn guild_groups(store: &DemoStore) -> Result<Vec<FormGroup>, AppError> {
    let prefix_store = store.clone();
    let prefix = text_option(store, "prefix", "Command prefix")
        .on_update(move |ctx, value| {
            let store = prefix_store.clone();
            async move { set_prefix(&store, &ctx, value).await }
        })
        .build()?;

    let general = FormGroupBuilder::new()
        .id("general")
        .meta(json!({ "title": "General" }))
        .option(prefix)
        .build()?;

    let premium = FormGroupBuilder::new()
        .id("premium")
        .meta(json!({ "title": "Premium" }))
        .option(text_option(store, "welcome", "Welcome message").build()?)
        .can_access(|_| async {
            Ok(AccessControlResult::disallowed_with(true, "Premium is not enabled for this guild"))
        })
        .build()?;

    Ok(vec![general, premium])
}

async fn set_prefix(store: &DemoStore, ctx: &OptionContext, value: Value) -> CallbackResult<OptionSetResult> {
    let Some(prefix) = value.as_str() else {
        return Ok(OptionSetResult::error_with("Prefix must be text"));
    };

    if prefix.is_empty() || prefix.chars().count() > MAX_PREFIX_LEN {
        return Ok(OptionSetResult::error_with(format!(
            "Prefix must be 1 to {} characters",
            MAX_PREFIX_LEN
        )));
    }

    store.set(scope(ctx), "prefix", value).await;

    Ok(OptionSetResult::ok())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let store = DemoStore::default();
    let dashboard = Dashboard::new(config)
        .set_user_options(user_groups(&store)?)
        .set_guild_options(guild_groups(&store)?);

    if dashboard.config().database_url.is_some() {
        dashboard.start().await
    } else {
        dashboard
            .start_with_store(tower_sessions::MemoryStore::default())
            .await
    }
}
