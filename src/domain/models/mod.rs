//! Domain Models
//!
//! Pure domain entities and value objects representing address management concepts.

pub mod address_pool;
pub mod group;
pub mod snapshot;
pub mod subnet;
pub mod user;

pub use address_pool::AddressPool;
pub use group::{CreateGroupData, Group, GroupSummary, SubnetSummary};
pub use snapshot::{
    AddressPoolSnapshot, GroupSnapshot, RegistrySnapshot, SubnetSnapshot, UserRegistrySnapshot,
};
pub use subnet::Subnet;
pub use user::{AddUserData, MoveUserData, User, UserRegistry};
