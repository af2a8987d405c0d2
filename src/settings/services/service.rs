//! Loading and saving the integration configuration.

use super::{RetryPolicy, StorageAttempts, StoragePhase};
use crate::settings::{
    domain::{ConfigValidationError, IntegrationConfig, SETTINGS_KEY, SettingsScope},
    ports::{SettingsStore, SettingsStoreError},
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Store a configuration was read from or written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    /// The host extension-data store.
    Host,
    /// The local fallback store.
    LocalFallback,
}

/// Outcome of a settings load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    config: Option<IntegrationConfig>,
    source: SettingsSource,
}

impl LoadedSettings {
    /// Returns the stored configuration, or `None` when nothing was saved.
    #[must_use]
    pub const fn config(&self) -> Option<&IntegrationConfig> {
        self.config.as_ref()
    }

    /// Returns the stored configuration or the defaults.
    #[must_use]
    pub fn into_config_or_default(self) -> IntegrationConfig {
        self.config.unwrap_or_default()
    }

    /// Returns the store the configuration came from.
    #[must_use]
    pub const fn source(&self) -> SettingsSource {
        self.source
    }
}

/// Errors returned by [`SettingsService`].
#[derive(Debug, Clone, Error)]
pub enum SettingsError {
    /// The configuration failed validation and was not saved.
    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),

    /// The stored blob is not a valid configuration.
    #[error("stored settings are malformed: {0}")]
    Malformed(String),

    /// Both the host store and the local fallback failed.
    #[error("settings unavailable: host store failed ({host}); local fallback failed ({fallback})")]
    Unavailable {
        /// Last host store error.
        host: SettingsStoreError,
        /// Fallback store error.
        fallback: SettingsStoreError,
    },
}

/// Loads and saves [`IntegrationConfig`] with bounded host retries and a
/// local fallback.
pub struct SettingsService<H, L>
where
    H: SettingsStore + ?Sized,
    L: SettingsStore + ?Sized,
{
    host: Arc<H>,
    fallback: Arc<L>,
    policy: RetryPolicy,
}

impl<H, L> Clone for SettingsService<H, L>
where
    H: SettingsStore + ?Sized,
    L: SettingsStore + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            host: Arc::clone(&self.host),
            fallback: Arc::clone(&self.fallback),
            policy: self.policy,
        }
    }
}

impl<H, L> SettingsService<H, L>
where
    H: SettingsStore + ?Sized,
    L: SettingsStore + ?Sized,
{
    /// Creates a service with the default retry policy.
    #[must_use]
    pub fn new(host: Arc<H>, fallback: Arc<L>) -> Self {
        Self {
            host,
            fallback,
            policy: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Loads the configuration stored for `scope`.
    ///
    /// The host store is tried up to the policy's attempt limit; when every
    /// attempt fails the local fallback store is read instead.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Malformed`] for an unreadable blob and
    /// [`SettingsError::Unavailable`] when both stores fail.
    pub async fn load(&self, scope: &SettingsScope) -> Result<LoadedSettings, SettingsError> {
        let mut attempts = StorageAttempts::new(self.policy);
        let host_error = loop {
            match self.host.get_value(scope, SETTINGS_KEY).await {
                Ok(value) => return decode(value, SettingsSource::Host),
                Err(err) => match attempts.record_failure() {
                    StoragePhase::Host { attempt } => {
                        warn!(%scope, attempt, error = %err, "retrying settings load");
                    }
                    StoragePhase::Fallback => break err,
                },
            }
        };

        warn!(%scope, error = %host_error, "host settings store failed, reading local fallback");
        match self.fallback.get_value(scope, SETTINGS_KEY).await {
            Ok(value) => decode(value, SettingsSource::LocalFallback),
            Err(fallback) => Err(SettingsError::Unavailable {
                host: host_error,
                fallback,
            }),
        }
    }

    /// Validates and saves `config` for `scope`.
    ///
    /// Writes are last-write-wins. When every host attempt fails the
    /// configuration is written to the local fallback store.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] without writing when validation
    /// fails and [`SettingsError::Unavailable`] when both stores fail.
    pub async fn save(
        &self,
        scope: &SettingsScope,
        config: &IntegrationConfig,
    ) -> Result<SettingsSource, SettingsError> {
        config.validate()?;
        let value = serde_json::to_value(config)
            .map_err(|err| SettingsError::Malformed(err.to_string()))?;

        let mut attempts = StorageAttempts::new(self.policy);
        let host_error = loop {
            match self.host.set_value(scope, SETTINGS_KEY, value.clone()).await {
                Ok(()) => {
                    info!(%scope, "settings saved");
                    return Ok(SettingsSource::Host);
                }
                Err(err) => match attempts.record_failure() {
                    StoragePhase::Host { attempt } => {
                        warn!(%scope, attempt, error = %err, "retrying settings save");
                    }
                    StoragePhase::Fallback => break err,
                },
            }
        };

        warn!(%scope, error = %host_error, "host settings store failed, writing local fallback");
        match self.fallback.set_value(scope, SETTINGS_KEY, value).await {
            Ok(()) => {
                info!(%scope, "settings saved to local fallback");
                Ok(SettingsSource::LocalFallback)
            }
            Err(fallback) => Err(SettingsError::Unavailable {
                host: host_error,
                fallback,
            }),
        }
    }
}

fn decode(value: Option<Value>, source: SettingsSource) -> Result<LoadedSettings, SettingsError> {
    let config = match value {
        None | Some(Value::Null) => {
            debug!(?source, "no stored settings");
            None
        }
        Some(blob) => Some(
            serde_json::from_value(blob).map_err(|err| SettingsError::Malformed(err.to_string()))?,
        ),
    };
    Ok(LoadedSettings { config, source })
}
