//! HTTP Handlers
//!
//! One router per resource, nested under its path prefix by the application.

pub mod groups;
pub mod snapshot;
pub mod users;
