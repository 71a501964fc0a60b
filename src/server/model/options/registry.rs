use std::collections::HashSet;

use crate::server::{error::build::BuildError, model::options::group::FormGroup};

/// The dashboard's configured option groups, split by namespace.
///
/// User options are edited per Discord user, guild options per user and guild.
/// Group ids only need to be unique within their own namespace. The registry is
/// immutable and shared read-only across all requests.
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    user: Vec<FormGroup>,
    guild: Vec<FormGroup>,
}

impl OptionRegistry {
    /// Validates and stores both namespaces.
    ///
    /// # Returns
    /// - `Ok(OptionRegistry)` - Group ids are unique per namespace
    /// - `Err(BuildError::DuplicateGroupId)` - A namespace repeats a group id
    pub fn new(user: Vec<FormGroup>, guild: Vec<FormGroup>) -> Result<Self, BuildError> {
        ensure_unique(&user, "user")?;
        ensure_unique(&guild, "guild")?;

        Ok(Self { user, guild })
    }

    pub fn user(&self) -> &[FormGroup] {
        &self.user
    }

    pub fn guild(&self) -> &[FormGroup] {
        &self.guild
    }
}

fn ensure_unique(groups: &[FormGroup], namespace: &'static str) -> Result<(), BuildError> {
    let mut seen = HashSet::new();

    for group in groups {
        if !seen.insert(group.id()) {
            return Err(BuildError::DuplicateGroupId {
                group: group.id().to_string(),
                namespace,
            });
        }
    }

    Ok(())
}
