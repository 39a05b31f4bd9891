//! Group Registry Adapters
//!
//! Implementations of the GroupRegistry gateway.

mod in_memory;

pub use in_memory::InMemoryGroupRegistry;
