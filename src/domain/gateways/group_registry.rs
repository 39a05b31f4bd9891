//! Group Registry Gateway
//!
//! Abstract trait defining the contract for the registry of groups and users.

use std::net::Ipv4Addr;

use crate::domain::models::group::GroupSummary;
use crate::domain::models::snapshot::RegistrySnapshot;
use crate::domain::models::user::User;
use crate::shared::errors::DomainError;

/// Registry of all groups
///
/// Implementations own the groups outright; callers only ever receive
/// summaries and user records, never a handle into a group.
pub trait GroupRegistry: Send + Sync {
    /// Create a group whose rule overlaps no other group
    fn create_group(&self, name: &str, rule: &str) -> Result<GroupSummary, DomainError>;

    /// Delete an empty group
    fn delete_group(&self, name: &str) -> Result<(), DomainError>;

    /// Replace a group's rule, keeping its allocations
    fn update_group_rule(&self, name: &str, rule: &str) -> Result<GroupSummary, DomainError>;

    /// Find a group by name
    fn find_group(&self, name: &str) -> Option<GroupSummary>;

    /// All groups, sorted by name
    fn list_groups(&self) -> Vec<GroupSummary>;

    /// Find a user in any group
    fn find_user_by_name(&self, name: &str) -> Option<User>;

    /// Create a user and admit it into a group
    fn add_user(
        &self,
        user_name: &str,
        group_name: &str,
        requested: Option<Ipv4Addr>,
    ) -> Result<User, DomainError>;

    /// Move a user to another group, or to another address in its own group
    fn move_user(
        &self,
        user_name: &str,
        target_group: &str,
        requested: Option<Ipv4Addr>,
    ) -> Result<User, DomainError>;

    /// Remove a user and release its address
    fn remove_user(&self, user_name: &str) -> Result<User, DomainError>;

    /// Consistent copy of the whole registry
    fn snapshot(&self) -> RegistrySnapshot;

    /// Replace the whole registry; nothing changes if the snapshot is rejected
    fn restore(&self, snapshot: RegistrySnapshot) -> Result<(), DomainError>;
}
