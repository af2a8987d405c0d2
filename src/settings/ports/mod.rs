//! Port contracts for settings persistence.

pub mod store;

pub use store::{SettingsStore, SettingsStoreError, SettingsStoreResult};
