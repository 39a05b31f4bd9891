//! Get Group Use Case
//!
//! Retrieves a single group with its subnets and users.

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::group::GroupSummary;
use crate::shared::errors::{DomainError, UseCaseError};

/// Use case for getting a group by name
pub struct GetGroupUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl GetGroupUseCase {
    /// Create a new GetGroupUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GroupNotFound` if the group doesn't exist.
    pub fn execute(&self, name: &str) -> Result<GroupSummary, UseCaseError> {
        tracing::debug!(group = %name, "Getting group");

        self.group_registry.find_group(name).ok_or_else(|| {
            tracing::debug!(group = %name, "Group not found");
            UseCaseError::Domain(DomainError::GroupNotFound(name.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::driven_adapters::InMemoryGroupRegistry;

    #[test]
    fn should_return_group_with_users() {
        let registry = Arc::new(InMemoryGroupRegistry::new());
        registry.create_group("office", "10.0.0.0/24").unwrap();
        registry.add_user("alice", "office", None).unwrap();

        let group = GetGroupUseCase::new(registry).execute("office").unwrap();

        assert_eq!(group.rule, "10.0.0.0/24");
        assert_eq!(group.allocated, 1);
        assert_eq!(group.users[0].name(), "alice");
    }

    #[test]
    fn should_return_not_found_when_group_does_not_exist() {
        let use_case = GetGroupUseCase::new(Arc::new(InMemoryGroupRegistry::new()));

        assert!(matches!(
            use_case.execute("ghost").unwrap_err(),
            UseCaseError::Domain(DomainError::GroupNotFound(name)) if name == "ghost"
        ));
    }
}
