use futures::future::join_all;

use crate::server::{
    error::options::OptionError,
    model::options::{
        access::AccessControlResult,
        callback::OptionContext,
        group::FormGroup,
        update::{UpdateFailure, UpdateGroupParam, UpdateOptionParam, UpdateReport},
    },
    service::options::OptionsService,
};

impl<'a> OptionsService<'a> {
    /// Applies a batch of option updates for a user.
    ///
    /// Every group and option update is processed independently: an unknown id, a
    /// denied access check, a rejected value or a failing setter is recorded for that
    /// item only and never stops the rest of the batch. Updates are not transactional,
    /// successful setters stay applied even when siblings fail.
    ///
    /// # Arguments
    /// - `ctx` - The requesting user and, for guild options, the guild
    /// - `updates` - Requested values grouped by group id
    ///
    /// # Returns
    /// - `UpdateReport` - Failures keyed by group id, empty when everything succeeded
    pub async fn apply(&self, ctx: OptionContext, updates: Vec<UpdateGroupParam>) -> UpdateReport {
        let results = join_all(updates.iter().map(|update| self.apply_group(update, ctx))).await;

        let mut report = UpdateReport::new();
        for (update, failures) in updates.iter().zip(results) {
            report.extend(&update.id, failures);
        }

        report
    }

    async fn apply_group(&self, update: &UpdateGroupParam, ctx: OptionContext) -> Vec<UpdateFailure> {
        let Some(group) = self.find_group(&update.id) else {
            return vec![UpdateFailure::group(OptionError::GroupNotFound(
                update.id.clone(),
            ))];
        };

        let access = match group.can_access(ctx).await {
            Ok(access) => access,
            Err(e) => {
                tracing::warn!("Access check for group '{}' failed: {}", group.id(), e);
                return vec![UpdateFailure::group(OptionError::Callback(e.to_string()))];
            }
        };

        if let AccessControlResult::Disallowed { message, .. } = access {
            let reason = OptionError::GroupDisallowed(message);

            if update.options.is_empty() {
                return vec![UpdateFailure::group(reason)];
            }

            return update
                .options
                .iter()
                .map(|option| UpdateFailure::option(&option.id, reason.clone()))
                .collect();
        }

        let results = join_all(
            update
                .options
                .iter()
                .map(|option| apply_option(group, option, ctx)),
        )
        .await;

        results.into_iter().flatten().collect()
    }
}

async fn apply_option(
    group: &FormGroup,
    update: &UpdateOptionParam,
    ctx: OptionContext,
) -> Option<UpdateFailure> {
    let Some(option) = group.option(&update.id) else {
        return Some(UpdateFailure::option(
            &update.id,
            OptionError::OptionNotFound(update.id.clone()),
        ));
    };

    let access = match option.can_access(ctx).await {
        Ok(access) => access,
        Err(e) => {
            tracing::warn!(
                "Access check for option '{}' in group '{}' failed: {}",
                option.id(),
                group.id(),
                e
            );
            return Some(UpdateFailure::option(
                option.id(),
                OptionError::Callback(e.to_string()),
            ));
        }
    };

    if let AccessControlResult::Disallowed { message, .. } = access {
        return Some(UpdateFailure::option(
            option.id(),
            OptionError::OptionDisallowed {
                id: option.id().to_string(),
                message,
            },
        ));
    }

    let reason = match option.set(ctx, update.value.clone()).await {
        Ok(result) if result.is_ok() => return None,
        Ok(result) => OptionError::SetRejected {
            id: option.id().to_string(),
            message: result.message,
        },
        Err(e) => OptionError::Callback(e.to_string()),
    };

    tracing::debug!(
        "Update of option '{}' in group '{}' failed: {}",
        option.id(),
        group.id(),
        reason
    );

    Some(UpdateFailure::option(option.id(), reason))
}
