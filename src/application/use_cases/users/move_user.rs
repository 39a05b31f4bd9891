//! Move User Use Case
//!
//! Moves a user into another group, or to another address in its own group.
//! The user keeps its old assignment if the move fails.

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::user::{MoveUserData, User};
use crate::shared::errors::UseCaseError;

/// Use case for moving a user between groups
pub struct MoveUserUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl MoveUserUseCase {
    /// Create a new MoveUserUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserNotFound` or `DomainError::GroupNotFound` for
    /// unknown names, or the target group's allocation error.
    pub fn execute(&self, name: &str, data: MoveUserData) -> Result<User, UseCaseError> {
        tracing::info!(
            user = %name,
            target_group = %data.group,
            requested = ?data.address,
            "Moving user"
        );

        let moved = self
            .group_registry
            .move_user(name, &data.group, data.address)
            .inspect_err(|err| tracing::warn!(user = %name, error = %err, "User move rejected"))?;

        tracing::info!(
            user = %name,
            group = ?moved.group_name(),
            address = ?moved.address(),
            "User moved successfully"
        );
        Ok(moved)
    }
}
