//! Key-value settings store port.

use crate::settings::domain::SettingsScope;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Result type for settings store operations.
pub type SettingsStoreResult<T> = Result<T, SettingsStoreError>;

/// Scoped key-value store holding JSON values.
///
/// Writes are last-write-wins; implementations perform no concurrency
/// checks.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsStoreError`] when the store cannot be read.
    async fn get_value(
        &self,
        scope: &SettingsScope,
        key: &str,
    ) -> SettingsStoreResult<Option<Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsStoreError`] when the store cannot be written.
    async fn set_value(
        &self,
        scope: &SettingsScope,
        key: &str,
        value: Value,
    ) -> SettingsStoreResult<()>;
}

/// Errors returned by settings store adapters.
#[derive(Debug, Clone, Error)]
pub enum SettingsStoreError {
    /// The store service could not be reached.
    #[error("settings store unavailable: {0}")]
    Unavailable(String),

    /// A stored value is not valid JSON.
    #[error("settings value could not be (de)serialized: {0}")]
    Serialization(String),

    /// Reading or writing the backing storage failed.
    #[error("settings persistence failed: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SettingsStoreError {
    /// Wraps a storage I/O error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
