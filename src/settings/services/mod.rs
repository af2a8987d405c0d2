//! Settings services.

mod attempts;
mod service;

pub use attempts::{DEFAULT_MAX_ATTEMPTS, RetryPolicy, StorageAttempts, StoragePhase};
pub use service::{LoadedSettings, SettingsError, SettingsService, SettingsSource};
