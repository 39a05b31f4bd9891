//! Update Group Rule Use Case
//!
//! Replaces a group's rule while every user keeps an address inside it.

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::group::GroupSummary;
use crate::shared::errors::UseCaseError;

/// Use case for replacing the rule of a group
pub struct UpdateGroupRuleUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl UpdateGroupRuleUseCase {
    /// Create a new UpdateGroupRuleUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if the rule is blank.
    /// Returns `DomainError::GroupNotFound`, `DomainError::InvalidRule`,
    /// `DomainError::RuleConflict` or `DomainError::RuleWouldOrphanAddress`
    /// from the registry. The group is unchanged on any error.
    pub fn execute(&self, name: &str, rule: &str) -> Result<GroupSummary, UseCaseError> {
        tracing::info!(group = %name, rule = %rule, "Updating group rule");

        if rule.trim().is_empty() {
            return Err(UseCaseError::Validation(vec!["Rule must not be empty".to_string()]));
        }

        let updated = self.group_registry.update_group_rule(name, rule)?;

        tracing::info!(
            group = %name,
            total_capacity = updated.total_capacity,
            allocated = updated.allocated,
            "Group rule updated successfully"
        );

        Ok(updated)
    }
}
