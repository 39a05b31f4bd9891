//! Add User Use Case
//!
//! Creates a user and assigns it an address in a group.

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::user::{AddUserData, User};
use crate::shared::errors::UseCaseError;

/// Use case for adding a user to a group
pub struct AddUserUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl AddUserUseCase {
    /// Create a new AddUserUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if the user name is blank.
    /// Returns `DomainError::UserAlreadyExists` if the name is taken in any group.
    /// Returns `DomainError::GroupNotFound`, `DomainError::NoAddressAvailable` or
    /// `DomainError::InvalidAddressRequest` from the registry.
    pub fn execute(&self, data: AddUserData) -> Result<User, UseCaseError> {
        tracing::info!(
            user = %data.name,
            group = %data.group,
            requested = ?data.address,
            "Adding user"
        );

        if data.name.trim().is_empty() {
            return Err(UseCaseError::Validation(vec!["User name must not be empty".to_string()]));
        }

        let user = self
            .group_registry
            .add_user(&data.name, &data.group, data.address)?;

        tracing::info!(user = %user.name(), address = ?user.address(), "User added successfully");
        Ok(user)
    }
}
