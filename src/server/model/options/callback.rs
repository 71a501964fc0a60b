//! Storage for author-supplied async callbacks.
//!
//! Options and groups hold their behavior as reference-counted closures returning
//! boxed futures, so nodes stay cheap to share across concurrent requests and
//! authors can capture any storage handle (database pool, cache, channel) they like.

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use serenity::all::{GuildId, UserId};
use std::{future::Future, panic::AssertUnwindSafe, sync::Arc};

use crate::server::model::options::access::{AccessControlResult, OptionSetResult};

/// Error type author callbacks may return; any `std::error::Error` converts into it with `?`.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

pub type CallbackResult<T> = Result<T, CallbackError>;

/// Who an option is being read or written for.
///
/// User-scoped options always receive `guild_id: None`, guild-scoped options
/// always receive the guild from the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionContext {
    pub user_id: UserId,
    pub guild_id: Option<GuildId>,
}

impl OptionContext {
    pub fn user(user_id: UserId) -> Self {
        Self {
            user_id,
            guild_id: None,
        }
    }

    pub fn guild(user_id: UserId, guild_id: GuildId) -> Self {
        Self {
            user_id,
            guild_id: Some(guild_id),
        }
    }
}

pub(crate) type GetFn = Arc<dyn Fn(OptionContext) -> BoxFuture<'static, CallbackResult<Value>> + Send + Sync>;

pub(crate) type SetFn = Arc<
    dyn Fn(OptionContext, Value) -> BoxFuture<'static, CallbackResult<OptionSetResult>>
        + Send
        + Sync,
>;

pub(crate) type AccessFn = Arc<
    dyn Fn(OptionContext) -> BoxFuture<'static, CallbackResult<AccessControlResult>> + Send + Sync,
>;

pub(crate) fn get_fn<F, Fut>(f: F) -> GetFn
where
    F: Fn(OptionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallbackResult<Value>> + Send + 'static,
{
    Arc::new(move |ctx| f(ctx).boxed())
}

pub(crate) fn set_fn<F, Fut>(f: F) -> SetFn
where
    F: Fn(OptionContext, Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallbackResult<OptionSetResult>> + Send + 'static,
{
    Arc::new(move |ctx, value| f(ctx, value).boxed())
}

pub(crate) fn access_fn<F, Fut>(f: F) -> AccessFn
where
    F: Fn(OptionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CallbackResult<AccessControlResult>> + Send + 'static,
{
    Arc::new(move |ctx| f(ctx).boxed())
}

/// Runs an author future, turning a panic into an ordinary callback error.
pub(crate) async fn guarded<T>(future: BoxFuture<'static, CallbackResult<T>>) -> CallbackResult<T> {
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(_) => Err("option callback panicked".into()),
    }
}

/// Evaluates an optional access check, treating a missing one as allowed.
pub(crate) async fn check_access(
    check: Option<&AccessFn>,
    ctx: OptionContext,
) -> CallbackResult<AccessControlResult> {
    match check {
        None => Ok(AccessControlResult::Allowed),
        Some(check) => guarded(check(ctx)).await,
    }
}
