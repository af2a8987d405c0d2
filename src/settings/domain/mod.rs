//! Domain model for integration settings.

mod config;
mod error;
mod scope;

pub use config::{ApiKey, IntegrationConfig, SETTINGS_KEY};
pub use error::ConfigValidationError;
pub(crate) use scope::safe_file_stem;
pub use scope::SettingsScope;
