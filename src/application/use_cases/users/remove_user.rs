//! Remove User Use Case
//!
//! Removes a user from its group and frees its address.

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::user::User;
use crate::shared::errors::UseCaseError;

/// Use case for removing a user
pub struct RemoveUserUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl RemoveUserUseCase {
    /// Create a new RemoveUserUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case, returning the removed user
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserNotFound` if no group holds the user.
    pub fn execute(&self, name: &str) -> Result<User, UseCaseError> {
        tracing::info!(user = %name, "Removing user");

        let removed = self.group_registry.remove_user(name)?;

        tracing::info!(user = %name, address = ?removed.address(), "User removed successfully");
        Ok(removed)
    }
}
