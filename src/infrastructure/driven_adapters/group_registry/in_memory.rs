//! In-Memory Group Registry Implementation
//!
//! Implements the GroupRegistry trait over a lock-protected map of groups.
//!
//! Lock order is always the group map first, then group locks; when two
//! groups are locked together they are taken in name order.

use std::collections::{BTreeMap, HashSet};
use std::net::Ipv4Addr;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::gateways::GroupRegistry;
use crate::domain::models::address_pool::AddressPool;
use crate::domain::models::group::{Group, GroupSummary};
use crate::domain::models::snapshot::RegistrySnapshot;
use crate::domain::models::user::User;
use crate::shared::errors::DomainError;

type SharedGroup = Arc<RwLock<Group>>;
type GroupMap = BTreeMap<String, SharedGroup>;

/// In-memory implementation of GroupRegistry
#[derive(Default)]
pub struct InMemoryGroupRegistry {
    groups: RwLock<GroupMap>,
}

impl InMemoryGroupRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `RuleConflict` if `candidate` overlaps any group but `name`
    fn check_conflicts(groups: &GroupMap, name: &str, rule: &str, candidate: &AddressPool) -> Result<(), DomainError> {
        for (other_name, other) in groups {
            if other_name != name && other.read().pool().overlaps(candidate) {
                tracing::warn!(group = %name, rule = %rule, conflicting_group = %other_name, "Rule overlaps another group");
                return Err(DomainError::RuleConflict {
                    rule: rule.to_string(),
                    group: other_name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Find the group holding `user_name`
    fn locate_user(groups: &GroupMap, user_name: &str) -> Option<(String, SharedGroup)> {
        groups
            .iter()
            .find(|(_, group)| group.read().users().contains(user_name))
            .map(|(name, group)| (name.clone(), Arc::clone(group)))
    }

    /// Remove `user_name` from `source` and admit it to `target` (or back
    /// into `source` when `target` is `None`)
    ///
    /// If admission fails the user is put back at its original address.
    fn transfer(
        source: &mut Group,
        target: Option<&mut Group>,
        user_name: &str,
        requested: Option<Ipv4Addr>,
    ) -> Result<User, DomainError> {
        let original = source.remove_user(user_name)?.address();

        let admitted = match target {
            Some(target) => target.admit_user(User::new(user_name), requested),
            None => source.admit_user(User::new(user_name), requested),
        };

        match admitted {
            Ok(user) => Ok(user),
            Err(err) => {
                if let Err(rollback) = source.admit_user(User::new(user_name), original) {
                    tracing::error!(user = %user_name, group = %source.name(), error = %rollback, "Failed to restore user after rejected move");
                    return Err(rollback);
                }
                Err(err)
            }
        }
    }
}

impl GroupRegistry for InMemoryGroupRegistry {
    fn create_group(&self, name: &str, rule: &str) -> Result<GroupSummary, DomainError> {
        let mut groups = self.groups.write();
        if groups.contains_key(name) {
            return Err(DomainError::GroupAlreadyExists(name.to_string()));
        }

        let group = Group::new(name, rule)?;
        Self::check_conflicts(&groups, name, rule, group.pool())?;

        let summary = group.summary();
        groups.insert(name.to_string(), Arc::new(RwLock::new(group)));
        tracing::debug!(group = %name, groups = groups.len(), "Group inserted");
        Ok(summary)
    }

    fn delete_group(&self, name: &str) -> Result<(), DomainError> {
        let mut groups = self.groups.write();
        let group = groups
            .get(name)
            .ok_or_else(|| DomainError::GroupNotFound(name.to_string()))?;

        let users = group.read().users().len();
        if users > 0 {
            return Err(DomainError::GroupNonEmpty {
                name: name.to_string(),
                users,
            });
        }

        groups.remove(name);
        Ok(())
    }

    fn update_group_rule(&self, name: &str, rule: &str) -> Result<GroupSummary, DomainError> {
        let groups = self.groups.write();
        let group = groups
            .get(name)
            .ok_or_else(|| DomainError::GroupNotFound(name.to_string()))?;

        let candidate = AddressPool::parse(rule)?;
        Self::check_conflicts(&groups, name, rule, &candidate)?;

        let mut group = group.write();
        group.replace_rule(rule)?;
        Ok(group.summary())
    }

    fn find_group(&self, name: &str) -> Option<GroupSummary> {
        self.groups.read().get(name).map(|group| group.read().summary())
    }

    fn list_groups(&self) -> Vec<GroupSummary> {
        self.groups
            .read()
            .values()
            .map(|group| group.read().summary())
            .collect()
    }

    fn find_user_by_name(&self, name: &str) -> Option<User> {
        self.groups
            .read()
            .values()
            .find_map(|group| group.read().user(name).cloned())
    }

    fn add_user(
        &self,
        user_name: &str,
        group_name: &str,
        requested: Option<Ipv4Addr>,
    ) -> Result<User, DomainError> {
        let groups = self.groups.write();
        let group = groups
            .get(group_name)
            .ok_or_else(|| DomainError::GroupNotFound(group_name.to_string()))?;

        if let Some((owner, _)) = Self::locate_user(&groups, user_name) {
            tracing::debug!(user = %user_name, group = %owner, "User name already taken");
            return Err(DomainError::UserAlreadyExists(user_name.to_string()));
        }

        let user = group.write().admit_user(User::new(user_name), requested)?;
        Ok(user)
    }

    fn move_user(
        &self,
        user_name: &str,
        target_group: &str,
        requested: Option<Ipv4Addr>,
    ) -> Result<User, DomainError> {
        let groups = self.groups.write();
        let (source_name, source) = Self::locate_user(&groups, user_name)
            .ok_or_else(|| DomainError::UserNotFound(user_name.to_string()))?;
        let target = groups
            .get(target_group)
            .ok_or_else(|| DomainError::GroupNotFound(target_group.to_string()))?;

        if source_name == target_group {
            let mut group = source.write();
            return Self::transfer(&mut group, None, user_name, requested);
        }

        let (mut source, mut target) = if source_name.as_str() < target_group {
            let source = source.write();
            (source, target.write())
        } else {
            let target = target.write();
            (source.write(), target)
        };
        Self::transfer(&mut source, Some(&mut *target), user_name, requested)
    }

    fn remove_user(&self, user_name: &str) -> Result<User, DomainError> {
        let groups = self.groups.write();
        let (_, group) = Self::locate_user(&groups, user_name)
            .ok_or_else(|| DomainError::UserNotFound(user_name.to_string()))?;

        let user = group.write().remove_user(user_name)?;
        Ok(user)
    }

    fn snapshot(&self) -> RegistrySnapshot {
        let groups = self.groups.read();
        RegistrySnapshot {
            groups: groups
                .iter()
                .map(|(name, group)| (name.clone(), group.read().snapshot()))
                .collect(),
        }
    }

    fn restore(&self, snapshot: RegistrySnapshot) -> Result<(), DomainError> {
        let mut rebuilt: BTreeMap<String, Group> = BTreeMap::new();
        let mut owners: HashSet<String> = HashSet::new();

        for (key, group_snapshot) in snapshot.groups {
            if key != group_snapshot.name {
                return Err(DomainError::InvalidSnapshot(format!(
                    "group key '{key}' does not match group '{}'",
                    group_snapshot.name
                )));
            }

            let group = Group::restore(group_snapshot)?;

            for user in group.users().iter() {
                if !owners.insert(user.name().to_string()) {
                    return Err(DomainError::UserAlreadyExists(user.name().to_string()));
                }
            }
            if let Some(other) = rebuilt.values().find(|other| other.pool().overlaps(group.pool())) {
                return Err(DomainError::RuleConflict {
                    rule: group.rule().to_string(),
                    group: other.name().to_string(),
                });
            }

            rebuilt.insert(key, group);
        }

        let rebuilt: GroupMap = rebuilt
            .into_iter()
            .map(|(name, group)| (name, Arc::new(RwLock::new(group))))
            .collect();
        *self.groups.write() = rebuilt;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn addr(a: u8, b: u8, c: u8, d: u8) -> Ipv4Addr {
        Ipv4Addr::new(a, b, c, d)
    }

    fn registry_with_group(rule: &str) -> InMemoryGroupRegistry {
        let registry = InMemoryGroupRegistry::new();
        registry.create_group("g1", rule).unwrap();
        registry
    }

    #[test]
    fn test_create_group_duplicate_name() {
        let registry = registry_with_group("192.168.16.0/22");
        assert_eq!(
            registry.create_group("g1", "192.168.64.0/22").unwrap_err(),
            DomainError::GroupAlreadyExists("g1".to_string())
        );
    }

    #[test]
    fn test_create_group_conflict_both_directions() {
        let registry = registry_with_group("192.168.16.0/22");
        assert!(matches!(
            registry.create_group("g2", "192.168.16.0/24"),
            Err(DomainError::RuleConflict { .. })
        ));

        let registry = registry_with_group("192.168.16.0/24");
        assert!(matches!(
            registry.create_group("g2", "192.168.16.0/22"),
            Err(DomainError::RuleConflict { .. })
        ));
        assert_eq!(registry.list_groups().len(), 1);
    }

    #[test]
    fn test_create_group_invalid_rule() {
        let registry = InMemoryGroupRegistry::new();
        assert!(matches!(
            registry.create_group("g1", "192.168.16.0/22,oops"),
            Err(DomainError::InvalidRule(_))
        ));
        assert!(registry.find_group("g1").is_none());
    }

    #[test]
    fn test_update_group_rule_conflict_excludes_self() {
        let registry = registry_with_group("192.168.16.0/22");
        registry.create_group("g2", "192.168.64.0/22").unwrap();

        // widening over itself is fine
        registry.update_group_rule("g1", "192.168.16.0/21").unwrap();

        let err = registry.update_group_rule("g2", "192.168.16.0/24").unwrap_err();
        assert_eq!(
            err,
            DomainError::RuleConflict {
                rule: "192.168.16.0/24".to_string(),
                group: "g1".to_string()
            }
        );
        assert_eq!(registry.find_group("g2").unwrap().rule, "192.168.64.0/22");
    }

    #[test]
    fn test_update_missing_group() {
        let registry = InMemoryGroupRegistry::new();
        assert_eq!(
            registry.update_group_rule("nope", "10.0.0.0/24").unwrap_err(),
            DomainError::GroupNotFound("nope".to_string())
        );
    }

    #[test]
    fn test_user_names_are_global() {
        let registry = registry_with_group("192.168.16.0/22");
        registry.create_group("g2", "192.168.64.0/22").unwrap();
        registry.add_user("u1", "g1", None).unwrap();

        assert_eq!(
            registry.add_user("u1", "g2", None).unwrap_err(),
            DomainError::UserAlreadyExists("u1".to_string())
        );
        assert_eq!(
            registry.add_user("u2", "g3", None).unwrap_err(),
            DomainError::GroupNotFound("g3".to_string())
        );
    }

    #[test]
    fn test_find_user_by_name() {
        let registry = registry_with_group("10.0.0.0/24");
        registry.add_user("u1", "g1", None).unwrap();

        let user = registry.find_user_by_name("u1").unwrap();
        assert_eq!(user.group_name(), Some("g1"));
        assert_eq!(user.address(), Some(addr(10, 0, 0, 1)));
        assert!(registry.find_user_by_name("u2").is_none());
    }

    #[test]
    fn test_move_user_between_groups() {
        let registry = registry_with_group("10.0.0.0/24");
        registry.create_group("g2", "10.0.1.0/24").unwrap();
        registry.add_user("u1", "g1", None).unwrap();

        let moved = registry.move_user("u1", "g2", Some(addr(10, 0, 1, 50))).unwrap();
        assert_eq!(moved.group_name(), Some("g2"));
        assert_eq!(moved.address(), Some(addr(10, 0, 1, 50)));
        assert_eq!(registry.find_group("g1").unwrap().allocated, 0);
        assert_eq!(registry.find_group("g2").unwrap().allocated, 1);
    }

    #[test]
    fn test_move_user_in_reverse_name_order() {
        let registry = registry_with_group("10.0.0.0/24");
        registry.create_group("a0", "10.0.1.0/24").unwrap();
        registry.add_user("u1", "g1", None).unwrap();

        let moved = registry.move_user("u1", "a0", None).unwrap();
        assert_eq!(moved.address(), Some(addr(10, 0, 1, 1)));
    }

    #[test]
    fn test_failed_move_restores_original_placement() {
        let registry = registry_with_group("10.0.0.0/24");
        registry.create_group("g2", "10.0.1.0/24").unwrap();
        registry.add_user("u1", "g1", Some(addr(10, 0, 0, 77))).unwrap();

        let err = registry.move_user("u1", "g2", Some(addr(10, 0, 2, 1))).unwrap_err();
        assert_eq!(err, DomainError::InvalidAddressRequest(addr(10, 0, 2, 1)));

        let user = registry.find_user_by_name("u1").unwrap();
        assert_eq!(user.group_name(), Some("g1"));
        assert_eq!(user.address(), Some(addr(10, 0, 0, 77)));
        assert_eq!(registry.find_group("g2").unwrap().allocated, 0);
    }

    #[test]
    fn test_failed_readdress_in_same_group_keeps_address() {
        let registry = registry_with_group("10.0.0.0/24");
        registry.add_user("u1", "g1", None).unwrap();
        registry.add_user("u2", "g1", None).unwrap();

        let err = registry.move_user("u1", "g1", Some(addr(10, 0, 0, 2))).unwrap_err();
        assert_eq!(err, DomainError::InvalidAddressRequest(addr(10, 0, 0, 2)));
        assert_eq!(
            registry.find_user_by_name("u1").unwrap().address(),
            Some(addr(10, 0, 0, 1))
        );
    }

    #[test]
    fn test_move_to_missing_group_changes_nothing() {
        let registry = registry_with_group("10.0.0.0/24");
        registry.add_user("u1", "g1", None).unwrap();

        assert_eq!(
            registry.move_user("u1", "g9", None).unwrap_err(),
            DomainError::GroupNotFound("g9".to_string())
        );
        assert_eq!(
            registry.move_user("ghost", "g1", None).unwrap_err(),
            DomainError::UserNotFound("ghost".to_string())
        );
        assert_eq!(registry.find_group("g1").unwrap().allocated, 1);
    }

    #[test]
    fn test_delete_group_requires_empty() {
        let registry = registry_with_group("10.0.0.0/24");
        registry.add_user("u1", "g1", None).unwrap();

        assert!(matches!(
            registry.delete_group("g1"),
            Err(DomainError::GroupNonEmpty { users: 1, .. })
        ));

        registry.remove_user("u1").unwrap();
        registry.delete_group("g1").unwrap();
        assert_eq!(
            registry.delete_group("g1").unwrap_err(),
            DomainError::GroupNotFound("g1".to_string())
        );
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let registry = registry_with_group("192.168.32.0/22,192.168.16.0/22");
        registry.create_group("g2", "10.0.0.0/24").unwrap();
        registry.add_user("u1", "g1", None).unwrap();
        registry.add_user("u2", "g1", Some(addr(192, 168, 17, 3))).unwrap();
        registry.add_user("u3", "g2", None).unwrap();

        let snapshot = registry.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();

        let other = InMemoryGroupRegistry::new();
        other.restore(serde_json::from_str(&json).unwrap()).unwrap();

        assert_eq!(other.snapshot(), snapshot);
        assert_eq!(other.list_groups(), registry.list_groups());
        assert_eq!(other.find_user_by_name("u2").unwrap().address(), Some(addr(192, 168, 17, 3)));
    }

    #[test]
    fn test_rejected_restore_keeps_live_registry() {
        let registry = registry_with_group("10.0.0.0/24");
        registry.add_user("u1", "g1", None).unwrap();
        let before = registry.snapshot();

        let mut overlapping = before.clone();
        let mut clone = overlapping.groups["g1"].clone();
        clone.name = "g2".to_string();
        clone.user_registry.users.clear();
        clone.address_pool.subnets[0].in_use.clear();
        overlapping.groups.insert("g2".to_string(), clone);

        assert!(matches!(
            registry.restore(overlapping),
            Err(DomainError::RuleConflict { .. })
        ));
        assert_eq!(registry.snapshot(), before);
    }

    #[test]
    fn test_restore_rejects_duplicate_user_across_groups() {
        let source = registry_with_group("10.0.0.0/24");
        source.create_group("g2", "10.0.1.0/24").unwrap();
        source.add_user("u1", "g1", None).unwrap();
        source.add_user("u2", "g2", None).unwrap();

        let mut snapshot = source.snapshot();
        let g2 = snapshot.groups.get_mut("g2").unwrap();
        let address = g2.user_registry.users.remove("u2").unwrap().address().unwrap();
        let mut impostor = User::new("u1");
        impostor.assign(address, "g2");
        g2.user_registry.users.insert("u1".to_string(), impostor);

        let target = InMemoryGroupRegistry::new();
        assert_eq!(
            target.restore(snapshot).unwrap_err(),
            DomainError::UserAlreadyExists("u1".to_string())
        );
        assert!(target.list_groups().is_empty());
    }

    #[test]
    fn test_concurrent_allocations_are_unique() {
        let registry = Arc::new(registry_with_group("10.0.0.0/22"));
        registry.create_group("g2", "10.1.0.0/22").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let group = if worker % 2 == 0 { "g1" } else { "g2" };
                    for i in 0..25 {
                        registry.add_user(&format!("w{worker}-u{i}"), group, None).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let groups = registry.list_groups();
        let addresses: HashSet<Ipv4Addr> = groups
            .iter()
            .flat_map(|g| g.users.iter().filter_map(User::address))
            .collect();
        assert_eq!(addresses.len(), 200);
        assert!(groups.iter().all(|g| g.allocated == 100));
    }
}
