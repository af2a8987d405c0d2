//! Step definitions for settings fallback scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
