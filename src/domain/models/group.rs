//! Group Domain Model
//!
//! A named address space (rule + pool) and the users holding addresses in it.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use crate::domain::models::address_pool::AddressPool;
use crate::domain::models::snapshot::{
    AddressPoolSnapshot, GroupSnapshot, SubnetSnapshot, UserRegistrySnapshot,
};
use crate::domain::models::user::{User, UserRegistry};
use crate::shared::errors::DomainError;

/// Data required to create a new Group
#[derive(Debug, Clone)]
pub struct CreateGroupData {
    pub name: String,
    pub rule: String,
}

/// Read-only view of one subnet of a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetSummary {
    pub rule: String,
    pub capacity: i64,
    pub in_use: Vec<Ipv4Addr>,
}

/// Read-only view of a group handed out to callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub name: String,
    pub rule: String,
    pub total_capacity: i64,
    pub allocated: usize,
    pub subnets: Vec<SubnetSummary>,
    pub users: Vec<User>,
}

/// Group entity
///
/// Every user in `users` holds exactly one address of `pool`, and every
/// address allocated in `pool` belongs to one of `users`.
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    rule: String,
    pool: AddressPool,
    users: UserRegistry,
}

impl Group {
    /// Create an empty group governed by `rule`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRule` if the rule does not parse.
    pub fn new(name: &str, rule: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: name.to_string(),
            rule: rule.to_string(),
            pool: AddressPool::parse(rule)?,
            users: UserRegistry::new(),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    #[must_use]
    pub fn pool(&self) -> &AddressPool {
        &self.pool
    }

    #[must_use]
    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    #[must_use]
    pub fn user(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    /// Allocate an address for `user` and register it here
    ///
    /// Returns the admitted user record. No address stays allocated if the
    /// user cannot be registered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserAlreadyInGroup` if the user is already
    /// registered here, or the pool's allocation error.
    pub fn admit_user(&mut self, mut user: User, requested: Option<Ipv4Addr>) -> Result<User, DomainError> {
        if self.users.contains(user.name()) {
            return Err(DomainError::UserAlreadyInGroup {
                user: user.name().to_string(),
                group: self.name.clone(),
            });
        }

        let address = self.pool.allocate(requested)?;
        user.assign(address, &self.name);
        let admitted = user.clone();

        if let Err(err) = self.users.add(user) {
            self.pool.release(address)?;
            return Err(err);
        }
        Ok(admitted)
    }

    /// Unregister `name` and release its address
    ///
    /// The user is gone once unregistered, even if the release then fails.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UserNotFound` if the user is not registered here,
    /// or `DomainError::AddressNotAllocated` if its address was not held.
    pub fn remove_user(&mut self, name: &str) -> Result<User, DomainError> {
        let user = self.users.remove(name)?;
        if let Some(address) = user.address() {
            if let Err(err) = self.pool.release(address) {
                tracing::warn!(group = %self.name, user = %name, %address, "Removed user held no allocation");
                return Err(err);
            }
        }
        Ok(user)
    }

    /// Swap in a new rule, keeping every allocation
    ///
    /// # Errors
    ///
    /// Returns the pool's reparse error; the rule is unchanged in that case.
    pub fn replace_rule(&mut self, rule: &str) -> Result<(), DomainError> {
        self.pool.reparse(rule)?;
        self.rule = rule.to_string();
        Ok(())
    }

    #[must_use]
    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            name: self.name.clone(),
            rule: self.rule.clone(),
            total_capacity: self.pool.total_capacity(),
            allocated: self.pool.allocated_count(),
            subnets: self
                .pool
                .subnets()
                .iter()
                .map(|s| SubnetSummary {
                    rule: s.rule().to_string(),
                    capacity: s.capacity(),
                    in_use: s.in_use().collect(),
                })
                .collect(),
            users: self.users.iter().cloned().collect(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            name: self.name.clone(),
            rule: self.rule.clone(),
            address_pool: AddressPoolSnapshot {
                subnets: self
                    .pool
                    .subnets()
                    .iter()
                    .map(|s| SubnetSnapshot {
                        rule: s.rule().to_string(),
                        in_use: s.in_use().collect(),
                    })
                    .collect(),
            },
            user_registry: UserRegistrySnapshot {
                users: self
                    .users
                    .iter()
                    .map(|u| (u.name().to_string(), u.clone()))
                    .collect(),
            },
        }
    }

    /// Rebuild a group from a snapshot, re-admitting every user at its
    /// recorded address
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRule` for an unparsable rule, an
    /// allocation error for an address the rule cannot hold, or
    /// `DomainError::InvalidSnapshot` when the recorded pool does not agree
    /// with the rule or with the users.
    pub fn restore(snapshot: GroupSnapshot) -> Result<Self, DomainError> {
        let mut group = Self::new(&snapshot.name, &snapshot.rule)?;
        let invalid = |reason: String| DomainError::InvalidSnapshot(format!("group '{}': {reason}", snapshot.name));

        let recorded = &snapshot.address_pool.subnets;
        let subnets = group.pool.subnets();
        if recorded.len() != subnets.len() || recorded.iter().zip(subnets).any(|(r, s)| r.rule != s.rule()) {
            return Err(invalid("subnet list does not match the rule".to_string()));
        }

        for (key, user) in &snapshot.user_registry.users {
            if key != user.name() {
                return Err(invalid(format!("user key '{key}' does not match user '{}'", user.name())));
            }
            if user.group_name() != Some(snapshot.name.as_str()) {
                return Err(invalid(format!("user '{key}' belongs to another group")));
            }
            let address = user
                .address()
                .ok_or_else(|| invalid(format!("user '{key}' has no address")))?;
            group.admit_user(User::new(user.name()), Some(address))?;
        }

        for (recorded, subnet) in recorded.iter().zip(group.pool.subnets()) {
            let expected: BTreeSet<Ipv4Addr> = recorded.in_use.iter().copied().collect();
            if !expected.iter().copied().eq(subnet.in_use()) || expected.len() != recorded.in_use.len() {
                return Err(invalid(format!("in-use addresses of {} do not match its users", subnet.rule())));
            }
        }

        Ok(group)
    }
}
