//! Get User Use Case

use std::sync::Arc;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::user::User;
use crate::shared::errors::{DomainError, UseCaseError};

/// Use case for looking a user up across all groups
pub struct GetUserUseCase {
    group_registry: Arc<dyn GroupRegistry>,
}

impl GetUserUseCase {
    /// Create a new GetUserUseCase
    #[must_use]
    pub fn new(group_registry: Arc<dyn GroupRegistry>) -> Self {
        Self { group_registry }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserNotFound` if no group holds the user.
    pub fn execute(&self, name: &str) -> Result<User, UseCaseError> {
        tracing::debug!(user = %name, "Getting user");

        self.group_registry
            .find_user_by_name(name)
            .ok_or_else(|| UseCaseError::Domain(DomainError::UserNotFound(name.to_string())))
    }
}
