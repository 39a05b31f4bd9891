//! Delete Group Use Case
//!
//! Removes a group that no longer has any users.

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::shared::errors::UseCaseError;

/// Use case for deleting an empty group
pub struct DeleteGroupUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl DeleteGroupUseCase {
    /// Create a new DeleteGroupUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `DomainError::GroupNotFound` if the group doesn't exist.
    /// Returns `DomainError::GroupNonEmpty` if users are still assigned to it.
    pub fn execute(&self, name: &str) -> Result<(), UseCaseError> {
        tracing::info!(group = %name, "Deleting group");

        self.group_registry.delete_group(name)?;

        tracing::info!(group = %name, "Group deleted successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::driven_adapters::InMemoryGroupRegistry;
    use crate::shared::errors::DomainError;

    #[test]
    fn should_delete_empty_group() {
        let registry = Arc::new(InMemoryGroupRegistry::new());
        registry.create_group("office", "10.0.0.0/24").unwrap();

        let use_case = DeleteGroupUseCase::new(registry.clone());
        use_case.execute("office").unwrap();

        assert!(registry.find_group("office").is_none());
    }

    #[test]
    fn should_refuse_group_with_users() {
        let registry = Arc::new(InMemoryGroupRegistry::new());
        registry.create_group("office", "10.0.0.0/24").unwrap();
        registry.add_user("alice", "office", None).unwrap();

        let use_case = DeleteGroupUseCase::new(registry.clone());
        let result = use_case.execute("office");

        assert!(matches!(
            result.unwrap_err(),
            UseCaseError::Domain(DomainError::GroupNonEmpty { users: 1, .. })
        ));
        assert!(registry.find_group("office").is_some());
    }

    #[test]
    fn should_return_not_found_for_unknown_group() {
        let use_case = DeleteGroupUseCase::new(Arc::new(InMemoryGroupRegistry::new()));

        assert!(matches!(
            use_case.execute("ghost").unwrap_err(),
            UseCaseError::Domain(DomainError::GroupNotFound(_))
        ));
    }
}
