//! Resolution of form options for reads and writes.
//!
//! The service walks one namespace of configured groups (user or guild) for a single
//! request. Groups are evaluated concurrently, as are the options within a group;
//! results always follow the configured order. Author callbacks may fail or panic,
//! and every such failure is confined to the group or option it belongs to.
//!
//! - `read` - Visible groups and options with their current values
//! - `write` - Applies a batch of updates and reports what failed

pub mod read;
pub mod write;

#[cfg(test)]
mod test;

use crate::server::model::options::group::FormGroup;

/// Service resolving one namespace of option groups.
pub struct OptionsService<'a> {
    /// Configured groups, in display order.
    groups: &'a [FormGroup],
}

impl<'a> OptionsService<'a> {
    /// Creates a new OptionsService instance.
    ///
    /// # Arguments
    /// - `groups` - The user or guild namespace from the option registry
    ///
    /// # Returns
    /// - `OptionsService` - New service instance
    pub fn new(groups: &'a [FormGroup]) -> Self {
        Self { groups }
    }

    fn find_group(&self, id: &str) -> Option<&'a FormGroup> {
        self.groups.iter().find(|group| group.id() == id)
    }
}
