//! Step definitions for reference validation scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
