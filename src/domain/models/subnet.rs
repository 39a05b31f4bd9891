//! Subnet Domain Model
//!
//! A single parsed CIDR block together with the host addresses allocated in it.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnet::Ipv4Net;

use crate::shared::errors::DomainError;

/// One CIDR range of a group's address space
///
/// Allocated addresses are kept ordered so the lowest free host can be found
/// by walking the set instead of probing every candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subnet {
    rule: String,
    network: Ipv4Net,
    in_use: BTreeSet<Ipv4Addr>,
}

impl Subnet {
    /// Create an empty subnet for the given network
    #[must_use]
    pub fn new(network: Ipv4Net) -> Self {
        let network = network.trunc();
        Self {
            rule: network.to_string(),
            network,
            in_use: BTreeSet::new(),
        }
    }

    /// Parse a single CIDR entry such as `192.168.16.0/22`
    ///
    /// Host bits of the input are dropped, so `192.168.16.7/22` yields the
    /// `192.168.16.0/22` subnet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRule` if the entry is not an IPv4 CIDR.
    pub fn parse(entry: &str) -> Result<Self, DomainError> {
        let entry = entry.trim();
        let network = Ipv4Net::from_str(entry)
            .map_err(|e| DomainError::InvalidRule(format!("'{entry}' is not an IPv4 CIDR: {e}")))?;
        Ok(Self::new(network))
    }

    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    #[must_use]
    pub fn network(&self) -> Ipv4Net {
        self.network
    }

    /// Number of host addresses, `2^(32 - prefix) - 2`
    ///
    /// Zero or negative for /31 and /32, which never allocate.
    #[must_use]
    pub fn capacity(&self) -> i64 {
        (1_i64 << (32 - u32::from(self.network.prefix_len()))) - 2
    }

    /// CIDR containment, network and broadcast addresses included
    #[must_use]
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.network.contains(&addr)
    }

    /// True if either subnet's network address falls inside the other
    #[must_use]
    pub fn overlaps(&self, other: &Subnet) -> bool {
        self.contains(other.network.network()) || other.contains(self.network.network())
    }

    /// Whether `addr` is a host address of this subnet
    pub(crate) fn can_host(&self, addr: Ipv4Addr) -> bool {
        self.capacity() > 0
            && self.contains(addr)
            && addr != self.network.network()
            && addr != self.network.broadcast()
    }

    #[must_use]
    pub fn is_used(&self, addr: Ipv4Addr) -> bool {
        self.in_use.contains(&addr)
    }

    /// Allocated addresses in ascending order
    pub fn in_use(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        self.in_use.iter().copied()
    }

    #[must_use]
    pub fn in_use_count(&self) -> usize {
        self.in_use.len()
    }

    /// Find an address that could be allocated, without allocating it
    ///
    /// A requested address is returned only if it is a free host address of
    /// this subnet. Without a request, the lowest free host address is
    /// returned; the last host before the broadcast address is included.
    #[must_use]
    pub fn find_available(&self, requested: Option<Ipv4Addr>) -> Option<Ipv4Addr> {
        match requested {
            Some(addr) => (self.can_host(addr) && !self.is_used(addr)).then_some(addr),
            None => self.lowest_free(),
        }
    }

    fn lowest_free(&self) -> Option<Ipv4Addr> {
        if self.capacity() <= 0 {
            return None;
        }
        let first = u32::from(self.network.network()) + 1;
        let last = u32::from(self.network.broadcast()) - 1;

        let mut candidate = first;
        for used in self.in_use.range(Ipv4Addr::from(first)..=Ipv4Addr::from(last)) {
            if u32::from(*used) != candidate {
                break;
            }
            candidate += 1;
        }

        (candidate <= last).then(|| Ipv4Addr::from(candidate))
    }

    /// Record `addr` as allocated; false if it already was
    pub(crate) fn mark_used(&mut self, addr: Ipv4Addr) -> bool {
        self.in_use.insert(addr)
    }

    /// Return `addr` to the free space
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AddressNotAllocated` if `addr` is not in use here.
    pub fn release(&mut self, addr: Ipv4Addr) -> Result<(), DomainError> {
        if self.in_use.remove(&addr) {
            Ok(())
        } else {
            Err(DomainError::AddressNotAllocated(addr))
        }
    }
}
