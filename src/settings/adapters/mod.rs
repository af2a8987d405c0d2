//! Settings store adapters.
//!
//! # Available Adapters
//!
//! - [`memory::InMemorySettingsStore`]: host store stand-in with failure
//!   injection
//! - [`local::LocalSettingsStore`]: JSON files in a local directory, used as
//!   the fallback store

pub mod local;
pub mod memory;
