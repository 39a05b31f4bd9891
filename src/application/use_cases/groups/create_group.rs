//! Create Group Use Case
//!
//! Registers a new group with its own, non-overlapping address space.

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::group::{CreateGroupData, GroupSummary};
use crate::shared::errors::UseCaseError;

/// Use case for creating a new group
pub struct CreateGroupUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl CreateGroupUseCase {
    /// Create a new CreateGroupUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if the name or rule is blank.
    /// Returns `DomainError::GroupAlreadyExists`, `DomainError::InvalidRule` or
    /// `DomainError::RuleConflict` from the registry.
    pub fn execute(&self, data: CreateGroupData) -> Result<GroupSummary, UseCaseError> {
        tracing::info!(group = %data.name, rule = %data.rule, "Creating new group");

        let mut errors = Vec::new();
        if data.name.trim().is_empty() {
            errors.push("Group name must not be empty".to_string());
        }
        if data.rule.trim().is_empty() {
            errors.push("Rule must not be empty".to_string());
        }
        if !errors.is_empty() {
            return Err(UseCaseError::Validation(errors));
        }

        let created = self.group_registry.create_group(&data.name, &data.rule)?;

        tracing::info!(
            group = %created.name,
            total_capacity = created.total_capacity,
            "Group created successfully"
        );

        Ok(created)
    }
}
