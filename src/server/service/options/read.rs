use futures::future::join_all;
use serde_json::Value;

use crate::server::{
    error::options::NOT_ALLOWED_GROUP_DISALLOWED,
    model::options::{
        access::AccessControlResult,
        callback::OptionContext,
        group::FormGroup,
        option::FormOption,
        view::{Disabled, GroupView, OptionView},
    },
    service::options::OptionsService,
};

impl<'a> OptionsService<'a> {
    /// Resolves the groups and options visible to a user.
    ///
    /// Hidden groups (denied with `display_in_api = false`) and hidden options are left
    /// out. Denied but visible items are returned with a `disabled` marker; when a group
    /// is denied, all of its visible options are disabled with the
    /// `NOT_ALLOWED_GROUP_DISALLOWED` message. Values are fetched for every returned
    /// option, disabled or not, exactly once.
    ///
    /// # Arguments
    /// - `ctx` - The requesting user and, for guild options, the guild
    ///
    /// # Returns
    /// - `Vec<GroupView>` - Visible groups in configured order
    pub async fn resolve(&self, ctx: OptionContext) -> Vec<GroupView> {
        let groups = join_all(self.groups.iter().map(|group| resolve_group(group, ctx))).await;

        groups.into_iter().flatten().collect()
    }
}

async fn resolve_group(group: &FormGroup, ctx: OptionContext) -> Option<GroupView> {
    let access = match group.can_access(ctx).await {
        Ok(access) => access,
        Err(e) => {
            tracing::warn!("Access check for group '{}' failed, hiding it: {}", group.id(), e);
            return None;
        }
    };

    if !access.is_visible() {
        return None;
    }

    let group_allowed = access.is_allowed();
    let disabled = match access {
        AccessControlResult::Allowed => None,
        AccessControlResult::Disallowed { message, .. } => Some(Disabled::new(message)),
    };

    let options = join_all(
        group
            .options()
            .iter()
            .map(|option| resolve_option(group.id(), option, group_allowed, ctx)),
    )
    .await;

    Some(GroupView {
        id: group.id().to_string(),
        meta: group.meta().clone(),
        disabled,
        options: options.into_iter().flatten().collect(),
    })
}

async fn resolve_option(
    group_id: &str,
    option: &FormOption,
    group_allowed: bool,
    ctx: OptionContext,
) -> Option<OptionView> {
    let access = match option.can_access(ctx).await {
        Ok(access) => access,
        Err(e) => {
            tracing::warn!(
                "Access check for option '{}' in group '{}' failed, hiding it: {}",
                option.id(),
                group_id,
                e
            );
            return None;
        }
    };

    if !access.is_visible() {
        return None;
    }

    let mut disabled = if group_allowed {
        match access {
            AccessControlResult::Allowed => None,
            AccessControlResult::Disallowed { message, .. } => Some(Disabled::new(message)),
        }
    } else {
        Some(Disabled::new(Some(NOT_ALLOWED_GROUP_DISALLOWED.to_string())))
    };

    let value = match option.get(ctx).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                "Failed to read option '{}' in group '{}': {}",
                option.id(),
                group_id,
                e
            );
            disabled = Some(Disabled::new(Some(e.to_string())));
            Value::Null
        }
    };

    Some(OptionView {
        id: option.id().to_string(),
        option_type: option.option_type().to_string(),
        meta: option.meta().clone(),
        value,
        disabled,
    })
}
