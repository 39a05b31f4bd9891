//! IPAM Registry
//!
//! In-memory IPv4 address management: groups own non-overlapping address
//! spaces, and every user holds exactly one address in its group. Laid out
//! along Clean/Hexagonal Architecture lines and exposed over a REST API.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
