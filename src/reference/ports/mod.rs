//! Port contracts for reference validation.
//!
//! Ports define infrastructure-agnostic interfaces used by the validation
//! service.

pub mod tracker;

pub use tracker::{IssueTracker, TrackerError, TrackerResult};
