//! List Groups Use Case

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::group::GroupSummary;

/// Use case for listing every group
pub struct ListGroupsUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl ListGroupsUseCase {
    /// Create a new ListGroupsUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case; groups come back sorted by name
    #[must_use]
    pub fn execute(&self) -> Vec<GroupSummary> {
        let groups = self.group_registry.list_groups();
        tracing::debug!(count = groups.len(), "Listed groups");
        groups
    }
}
