//! Address Pool Domain Model
//!
//! The ordered list of subnets that forms one group's address space.

use std::net::Ipv4Addr;

use crate::domain::models::subnet::Subnet;
use crate::shared::errors::DomainError;

/// Ordered subnets of a group; declaration order is allocation priority
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPool {
    subnets: Vec<Subnet>,
}

impl AddressPool {
    /// Parse a comma-separated rule such as `192.168.16.0/22,192.168.32.0/22`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRule` if any entry is not an IPv4 CIDR or
    /// if two entries of the rule overlap each other.
    pub fn parse(rule: &str) -> Result<Self, DomainError> {
        let mut subnets: Vec<Subnet> = Vec::new();
        for entry in rule.split(',') {
            let subnet = Subnet::parse(entry)?;
            if let Some(existing) = subnets.iter().find(|s| s.overlaps(&subnet)) {
                return Err(DomainError::InvalidRule(format!(
                    "'{}' overlaps '{}' in the same rule",
                    subnet.rule(),
                    existing.rule()
                )));
            }
            subnets.push(subnet);
        }
        Ok(Self { subnets })
    }

    #[must_use]
    pub fn subnets(&self) -> &[Subnet] {
        &self.subnets
    }

    /// Sum of the member subnets' capacities
    #[must_use]
    pub fn total_capacity(&self) -> i64 {
        self.subnets.iter().map(Subnet::capacity).sum()
    }

    #[must_use]
    pub fn allocated_count(&self) -> usize {
        self.subnets.iter().map(Subnet::in_use_count).sum()
    }

    /// Every allocated address, subnet by subnet
    pub fn allocated(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.subnets.iter().flat_map(|s| s.in_use())
    }

    #[must_use]
    pub fn is_allocated(&self, addr: Ipv4Addr) -> bool {
        self.subnets.iter().any(|s| s.is_used(addr))
    }

    /// True if any subnet of either pool has its network address inside a
    /// subnet of the other pool
    #[must_use]
    pub fn overlaps(&self, other: &AddressPool) -> bool {
        self.subnets
            .iter()
            .any(|mine| other.subnets.iter().any(|theirs| mine.overlaps(theirs)))
    }

    /// Allocate the requested address, or the lowest free one
    ///
    /// Subnets are tried in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAddressRequest` if a requested address is
    /// rejected by every subnet, `DomainError::NoAddressAvailable` if the pool
    /// is exhausted.
    pub fn allocate(&mut self, requested: Option<Ipv4Addr>) -> Result<Ipv4Addr, DomainError> {
        for subnet in &mut self.subnets {
            if let Some(addr) = subnet.find_available(requested) {
                subnet.mark_used(addr);
                return Ok(addr);
            }
        }
        Err(requested.map_or(DomainError::NoAddressAvailable, DomainError::InvalidAddressRequest))
    }

    /// Release `addr` from whichever subnet holds it
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AddressNotAllocated` if no subnet holds it.
    pub fn release(&mut self, addr: Ipv4Addr) -> Result<(), DomainError> {
        self.subnets
            .iter_mut()
            .find(|s| s.is_used(addr))
            .ok_or(DomainError::AddressNotAllocated(addr))?
            .release(addr)
    }

    /// Replace the subnet list with `rule`, carrying every allocation over
    ///
    /// Each allocated address moves into the first new subnet that can host
    /// it. The pool is left untouched on any error.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRule` if the rule does not parse,
    /// `DomainError::RuleWouldOrphanAddress` if an allocated address has no
    /// host subnet under the new rule.
    pub fn reparse(&mut self, rule: &str) -> Result<(), DomainError> {
        let mut candidate = Self::parse(rule)?;
        for addr in self.allocated() {
            let host = candidate
                .subnets
                .iter_mut()
                .find(|s| s.can_host(addr))
                .ok_or(DomainError::RuleWouldOrphanAddress(addr))?;
            host.mark_used(addr);
        }
        self.subnets = candidate.subnets;
        Ok(())
    }
}
