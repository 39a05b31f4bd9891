//! Domain Layer
//!
//! Contains the address allocation engine, domain models, and gateway traits (ports).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::group_registry::GroupRegistry;
pub use models::{AddressPool, Group, GroupSummary, RegistrySnapshot, Subnet, User, UserRegistry};
