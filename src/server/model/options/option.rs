//! A single configurable setting and its builder.

use serde_json::{Map, Value};
use std::{fmt, future::Future};

use crate::server::{
    error::build::BuildError,
    model::options::{
        access::{AccessControlResult, OptionSetResult},
        callback::{
            access_fn, check_access, get_fn, guarded, set_fn, AccessFn, CallbackResult, GetFn,
            OptionContext, SetFn,
        },
    },
};

/// Rendering discriminator for free text inputs.
pub const TEXT_INPUT: &str = "TextInput";

/// One configurable setting, immutable once built.
///
/// Storage is entirely up to the author: `get` and `set` are closures that may talk to
/// any backend. The access check is optional and counts as allowed when absent.
#[derive(Clone)]
pub struct FormOption {
    id: String,
    option_type: String,
    meta: Map<String, Value>,
    get: GetFn,
    set: SetFn,
    can_access: Option<AccessFn>,
}

impl FormOption {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn option_type(&self) -> &str {
        &self.option_type
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    /// Reads the current value for the given user (and guild).
    pub async fn get(&self, ctx: OptionContext) -> CallbackResult<Value> {
        guarded((self.get)(ctx)).await
    }

    /// Stores a new value for the given user (and guild).
    pub async fn set(&self, ctx: OptionContext, value: Value) -> CallbackResult<OptionSetResult> {
        guarded((self.set)(ctx, value)).await
    }

    /// Evaluates the option's own access check.
    pub async fn can_access(&self, ctx: OptionContext) -> CallbackResult<AccessControlResult> {
        check_access(self.can_access.as_ref(), ctx).await
    }
}

impl fmt::Debug for FormOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormOption")
            .field("id", &self.id)
            .field("option_type", &self.option_type)
            .field("meta", &self.meta)
            .field("can_access", &self.can_access.is_some())
            .finish_non_exhaustive()
    }
}

/// Accumulates the parts of a `FormOption`; `build()` validates them.
///
/// ```rust,ignore
/// let option = FormOptionBuilder::text_input()
///     .id("prefix")
///     .meta(json!({ "name": "Command prefix" }))
///     .on_request(|ctx| async move { Ok(json!("!")) })
///     .on_update(|ctx, value| async move { Ok(OptionSetResult::ok()) })
///     .build()?;
/// ```
pub struct FormOptionBuilder {
    id: Option<String>,
    option_type: String,
    meta: Value,
    get: Option<GetFn>,
    set: Option<SetFn>,
    can_access: Option<AccessFn>,
}

impl FormOptionBuilder {
    /// Starts an option rendered with the given type discriminator.
    pub fn new(option_type: impl Into<String>) -> Self {
        Self {
            id: None,
            option_type: option_type.into(),
            meta: Value::Object(Map::new()),
            get: None,
            set: None,
            can_access: None,
        }
    }

    pub fn text_input() -> Self {
        Self::new(TEXT_INPUT)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Free-form metadata passed through to the theme; must be a JSON object.
    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = meta;
        self
    }

    /// Getter invoked on every read of this option.
    pub fn on_request<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(OptionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult<Value>> + Send + 'static,
    {
        self.get = Some(get_fn(f));
        self
    }

    /// Setter invoked for every accepted write to this option.
    pub fn on_update<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(OptionContext, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult<OptionSetResult>> + Send + 'static,
    {
        self.set = Some(set_fn(f));
        self
    }

    pub fn can_access<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(OptionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult<AccessControlResult>> + Send + 'static,
    {
        self.can_access = Some(access_fn(f));
        self
    }

    /// Freezes the builder into an immutable option.
    ///
    /// # Returns
    /// - `Ok(FormOption)` - All required parts were provided
    /// - `Err(BuildError::MissingOptionId)` - No id, or an empty one
    /// - `Err(BuildError::MissingCallback)` - `on_request` or `on_update` not set
    /// - `Err(BuildError::InvalidMeta)` - Meta is not a JSON object
    pub fn build(self) -> Result<FormOption, BuildError> {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(BuildError::MissingOptionId),
        };

        let Value::Object(meta) = self.meta else {
            return Err(BuildError::InvalidMeta(id));
        };

        let Some(get) = self.get else {
            return Err(BuildError::MissingCallback {
                option: id,
                callback: "on_request",
            });
        };

        let Some(set) = self.set else {
            return Err(BuildError::MissingCallback {
                option: id,
                callback: "on_update",
            });
        };

        Ok(FormOption {
            id,
            option_type: self.option_type,
            meta,
            get,
            set,
            can_access: self.can_access,
        })
    }
}
