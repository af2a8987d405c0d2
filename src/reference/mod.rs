//! Issue reference extraction and validation.
//!
//! This is the core every surface reuses: a pure text-to-reference
//! extractor and a validation pipeline that resolves references against a
//! tracker capability and aggregates partial failures. The module follows
//! hexagonal architecture:
//!
//! - Domain types and the extractor in [`domain`]
//! - The tracker capability contract in [`ports`]
//! - Linear and in-memory trackers in [`adapters`]
//! - The validation pipeline in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
