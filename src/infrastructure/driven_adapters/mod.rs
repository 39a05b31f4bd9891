//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - In-memory group registry
//! - Configuration

pub mod config;
pub mod group_registry;

pub use config::AppConfig;
pub use group_registry::InMemoryGroupRegistry;
