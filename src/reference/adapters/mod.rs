//! Tracker adapters for the reference module.
//!
//! # Available Adapters
//!
//! - [`linear::LinearTracker`]: Linear GraphQL API with lazy connection
//! - [`memory::InMemoryIssueTracker`]: seeded in-memory tracker for tests

pub mod linear;
pub mod memory;
