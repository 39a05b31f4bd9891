//! User Domain Model
//!
//! A named holder of one address, and the per-group registry of users.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::shared::errors::DomainError;

/// Data required to add a new User to a group
#[derive(Debug, Clone)]
pub struct AddUserData {
    pub name: String,
    pub group: String,
    /// Specific address to assign; the lowest free one otherwise
    pub address: Option<Ipv4Addr>,
}

/// Data for moving a User to a group (possibly its own) and address
#[derive(Debug, Clone)]
pub struct MoveUserData {
    pub group: String,
    pub address: Option<Ipv4Addr>,
}

/// A named address holder
///
/// `address` and `group_name` are set together when the user is admitted
/// into a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    name: String,
    #[serde(default)]
    address: Option<Ipv4Addr>,
    #[serde(default)]
    group_name: Option<String>,
}

impl User {
    /// Create a user that has not been admitted anywhere yet
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            group_name: None,
        }
    }

    pub(crate) fn assign(&mut self, address: Ipv4Addr, group_name: &str) {
        self.address = Some(address);
        self.group_name = Some(group_name.to_string());
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> Option<Ipv4Addr> {
        self.address
    }

    #[must_use]
    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }
}

/// Name-keyed users of a single group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRegistry {
    users: BTreeMap<String, User>,
}

impl UserRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `DomainError::UserAlreadyExists` if the name is taken.
    pub fn add(&mut self, user: User) -> Result<(), DomainError> {
        if self.users.contains_key(user.name()) {
            return Err(DomainError::UserAlreadyExists(user.name));
        }
        self.users.insert(user.name.clone(), user);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DomainError::UserNotFound` if no user has this name.
    pub fn remove(&mut self, name: &str) -> Result<User, DomainError> {
        self.users
            .remove(name)
            .ok_or_else(|| DomainError::UserNotFound(name.to_string()))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Users in name order
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }
}
