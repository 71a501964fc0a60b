//! A named collection of options sharing one access check.

use serde_json::{Map, Value};
use std::{collections::HashSet, fmt, future::Future};

use crate::server::{
    error::build::BuildError,
    model::options::{
        access::AccessControlResult,
        callback::{access_fn, check_access, AccessFn, CallbackResult, OptionContext},
        option::FormOption,
    },
};

/// An ordered group of options. Denying the group denies every option in it.
#[derive(Clone)]
pub struct FormGroup {
    id: String,
    meta: Map<String, Value>,
    options: Vec<FormOption>,
    can_access: Option<AccessFn>,
}

impl FormGroup {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    pub fn options(&self) -> &[FormOption] {
        &self.options
    }

    /// Looks up an option by id. Ids are unique within a group.
    pub fn option(&self, id: &str) -> Option<&FormOption> {
        self.options.iter().find(|option| option.id() == id)
    }

    pub async fn can_access(&self, ctx: OptionContext) -> CallbackResult<AccessControlResult> {
        check_access(self.can_access.as_ref(), ctx).await
    }
}

impl fmt::Debug for FormGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormGroup")
            .field("id", &self.id)
            .field("meta", &self.meta)
            .field("options", &self.options)
            .field("can_access", &self.can_access.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct FormGroupBuilder {
    id: Option<String>,
    meta: Option<Value>,
    options: Vec<FormOption>,
    can_access: Option<AccessFn>,
}

impl FormGroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Appends one option, keeping insertion order.
    pub fn option(mut self, option: FormOption) -> Self {
        self.options.push(option);
        self
    }

    /// Appends several options, keeping insertion order.
    pub fn options(mut self, options: impl IntoIterator<Item = FormOption>) -> Self {
        self.options.extend(options);
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

    /// Freezes the builder into an immutable group.
    ///
    /// # Returns
    /// - `Ok(FormGroup)` - Valid group
    /// - `Err(BuildError::MissingGroupId)` - No id, or an empty one
    /// - `Err(BuildError::InvalidMeta)` - Meta is not a JSON object
    /// - `Err(BuildError::DuplicateOptionId)` - Two options share an id
    pub fn build(self) -> Result<FormGroup, BuildError> {
        let id = match self.id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(BuildError::MissingGroupId),
        };

        let meta = match self.meta {
            None => Map::new(),
            Some(Value::Object(meta)) => meta,
            Some(_) => return Err(BuildError::InvalidMeta(id)),
        };

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id()) {
                return Err(BuildError::DuplicateOptionId {
                    group: id,
                    option: option.id().to_string(),
                });
            }
        }

        Ok(FormGroup {
            id,
            meta,
            options: self.options,
            can_access: self.can_access,
        })
    }
}
