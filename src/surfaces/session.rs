//! Collaborators shared by every surface for one page or process.

use super::{PageLoad, StatusBlock};
use crate::host::{
    domain::HostContext,
    ports::{HostError, HostLifecycle, SourceControlError},
};
use crate::reference::{
    adapters::linear::{LINEAR_API_URL, LinearTracker},
    ports::{IssueTracker, TrackerError},
    services::ReferenceValidationService,
};
use crate::settings::{
    domain::{ConfigValidationError, IntegrationConfig, SettingsScope},
    ports::SettingsStore,
    services::{LoadedSettings, SettingsError, SettingsService, SettingsSource},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Builds a tracker capability from a loaded configuration.
pub trait TrackerFactory: Send + Sync {
    /// Returns a tracker using the credentials in `config`.
    fn tracker(&self, config: &IntegrationConfig) -> Arc<dyn IssueTracker>;
}

/// Factory producing [`LinearTracker`]s.
#[derive(Debug, Clone)]
pub struct LinearTrackerFactory {
    endpoint: String,
}

impl LinearTrackerFactory {
    /// Creates a factory for the production endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(LINEAR_API_URL)
    }

    /// Creates a factory for a custom endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for LinearTrackerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerFactory for LinearTrackerFactory {
    fn tracker(&self, config: &IntegrationConfig) -> Arc<dyn IssueTracker> {
        Arc::new(LinearTracker::with_endpoint(
            config.api_key.expose(),
            self.endpoint.clone(),
        ))
    }
}

/// Factory that hands out one pre-built tracker regardless of
/// configuration.
#[derive(Clone)]
pub struct SharedTracker(Arc<dyn IssueTracker>);

impl SharedTracker {
    /// Wraps `tracker`.
    #[must_use]
    pub const fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self(tracker)
    }
}

impl TrackerFactory for SharedTracker {
    fn tracker(&self, _config: &IntegrationConfig) -> Arc<dyn IssueTracker> {
        Arc::clone(&self.0)
    }
}

/// Errors raised while preparing or running a surface.
///
/// Surfaces convert these into rendered status blocks; they never reach
/// the host as failures.
#[derive(Debug, Clone, Error)]
pub enum SurfaceError {
    /// A host lifecycle call failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// Settings could not be loaded or saved.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A settings value failed validation.
    #[error(transparent)]
    Config(#[from] ConfigValidationError),

    /// The tracker could not answer.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// Source-control data could not be read or written.
    #[error(transparent)]
    SourceControl(#[from] SourceControlError),

    /// No API key is stored.
    #[error("Linear API key not configured")]
    NotConfigured,

    /// The host context lacks project, repository or pull request ids.
    #[error("Missing PR context information")]
    MissingPullRequestContext,

    /// A picked identifier is not among the loaded issues.
    #[error("issue {0} is not in the loaded list")]
    UnknownIssue(String),
}

/// Host, settings and tracker collaborators for a page.
///
/// Constructed once and passed to each surface; there is no global
/// instance.
pub struct PageSession {
    host: Arc<dyn HostLifecycle>,
    settings: SettingsService<dyn SettingsStore, dyn SettingsStore>,
    trackers: Arc<dyn TrackerFactory>,
}

impl PageSession {
    /// Creates a session.
    #[must_use]
    pub const fn new(
        host: Arc<dyn HostLifecycle>,
        settings: SettingsService<dyn SettingsStore, dyn SettingsStore>,
        trackers: Arc<dyn TrackerFactory>,
    ) -> Self {
        Self {
            host,
            settings,
            trackers,
        }
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &dyn HostLifecycle {
        self.host.as_ref()
    }

    /// Starts a page load on the host.
    #[must_use]
    pub fn begin(&self) -> PageLoad<'_> {
        PageLoad::new(self.host.as_ref())
    }

    /// Resolves the settings scope: the project, else the extension.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] when neither id is available.
    pub fn settings_scope(&self, context: &HostContext) -> Result<SettingsScope, SurfaceError> {
        if let Some(project_id) = context.project_id.as_deref()
            && let Ok(scope) = SettingsScope::new(project_id)
        {
            return Ok(scope);
        }
        let extension = self.host.extension_context()?;
        Ok(SettingsScope::new(extension.id)?)
    }

    /// Loads the settings stored for the page's scope.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] when the scope cannot be resolved or both
    /// settings stores fail.
    pub async fn load_settings(
        &self,
        context: &HostContext,
    ) -> Result<(SettingsScope, LoadedSettings), SurfaceError> {
        let scope = self.settings_scope(context)?;
        let loaded = self.load_settings_for(&scope).await?;
        Ok((scope, loaded))
    }

    /// Loads the settings stored under an already resolved `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] when both settings stores fail.
    pub async fn load_settings_for(
        &self,
        scope: &SettingsScope,
    ) -> Result<LoadedSettings, SurfaceError> {
        Ok(self.settings.load(scope).await?)
    }

    /// Loads the stored configuration, whether or not it holds a key.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::NotConfigured`] when nothing is stored.
    pub async fn stored_config(
        &self,
        context: &HostContext,
    ) -> Result<IntegrationConfig, SurfaceError> {
        let (scope, loaded) = self.load_settings(context).await?;
        if loaded.config().is_none() {
            warn!(%scope, "no Linear settings stored");
            return Err(SurfaceError::NotConfigured);
        }
        Ok(loaded.into_config_or_default())
    }

    /// Loads settings and requires an API key to be present.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::NotConfigured`] when nothing is stored or the
    /// key is blank.
    pub async fn require_config(
        &self,
        context: &HostContext,
    ) -> Result<IntegrationConfig, SurfaceError> {
        let config = self.stored_config(context).await?;
        require_credentials(&config)?;
        Ok(config)
    }

    /// Saves `config` under `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when validation fails or both stores fail.
    pub async fn save_settings(
        &self,
        scope: &SettingsScope,
        config: &IntegrationConfig,
    ) -> Result<SettingsSource, SettingsError> {
        self.settings.save(scope, config).await
    }

    /// Returns a tracker for `config`.
    #[must_use]
    pub fn tracker(&self, config: &IntegrationConfig) -> Arc<dyn IssueTracker> {
        self.trackers.tracker(config)
    }

    /// Returns a validation service over a tracker for `config`.
    #[must_use]
    pub fn validator(
        &self,
        config: &IntegrationConfig,
    ) -> ReferenceValidationService<dyn IssueTracker> {
        ReferenceValidationService::new(self.tracker(config))
    }
}

/// Fails with [`SurfaceError::NotConfigured`] when `config` has no key.
pub(super) fn require_credentials(config: &IntegrationConfig) -> Result<(), SurfaceError> {
    if config.has_credentials() {
        Ok(())
    } else {
        warn!("Linear API key not configured");
        Err(SurfaceError::NotConfigured)
    }
}

/// Warning rendered when no API key is stored.
#[must_use]
pub fn configuration_warning() -> StatusBlock {
    StatusBlock::warning(SurfaceError::NotConfigured.to_string())
        .with_detail("Configure it in Project Settings > Linear Integration.")
}
