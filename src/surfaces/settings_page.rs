//! Settings page: load, edit, validate, save and test the integration
//! configuration.

use super::{PageSession, StatusBlock, SurfaceError};
use crate::host::domain::HostContext;
use crate::settings::{
    domain::{ApiKey, IntegrationConfig, SettingsScope},
    services::SettingsSource,
};
use tracing::{info, warn};

/// Title shown after a stored configuration is loaded.
pub const SETTINGS_LOADED: &str = "Loaded saved settings";
/// Title shown when nothing is stored or loading failed.
pub const NO_SAVED_SETTINGS: &str = "No saved settings found";
/// Title shown after a successful save.
pub const SETTINGS_SAVED: &str = "Settings saved successfully";
/// Title shown when saving failed.
pub const SETTINGS_SAVE_FAILED: &str = "Failed to save settings";
/// Title shown when testing without a key.
pub const ENTER_API_KEY: &str = "Please enter a Linear API key";
/// Title shown when the connection test fails.
pub const CONNECTION_FAILED: &str =
    "Connection failed. Please check your API key or network connectivity.";

const LOCAL_FALLBACK_DETAIL: &str = "Stored locally; the host settings store is unavailable.";

/// Editable settings form bound to a page session.
pub struct SettingsPage<'s> {
    session: &'s PageSession,
    scope: Result<SettingsScope, SurfaceError>,
    config: IntegrationConfig,
    status: StatusBlock,
}

impl<'s> SettingsPage<'s> {
    /// Opens the page: handshake, acknowledgment, then settings load.
    ///
    /// The acknowledgment is sent right after the handshake so the form is
    /// usable while settings load. A failed load leaves the defaults in
    /// place.
    pub async fn open(session: &'s PageSession) -> Self {
        let mut page = session.begin();
        let handshake = page.handshake().await;
        page.acknowledge();

        let context = match handshake {
            Ok(context) => context,
            Err(err) => return Self::failed(session, err.into()),
        };
        Self::load(session, &context).await
    }

    async fn load(session: &'s PageSession, context: &HostContext) -> Self {
        let scope = match session.settings_scope(context) {
            Ok(scope) => scope,
            Err(err) => return Self::failed(session, err),
        };

        let (config, status) = match session.load_settings_for(&scope).await {
            Ok(loaded) => loaded.config().map_or_else(
                || (IntegrationConfig::default(), StatusBlock::info(NO_SAVED_SETTINGS)),
                |stored| {
                    let loaded_status = StatusBlock::success(SETTINGS_LOADED);
                    (stored.clone(), with_source_detail(loaded_status, loaded.source()))
                },
            ),
            Err(err) => {
                warn!(error = %err, "failed to load settings");
                (IntegrationConfig::default(), StatusBlock::info(NO_SAVED_SETTINGS))
            }
        };
        Self {
            session,
            scope: Ok(scope),
            config,
            status,
        }
    }

    fn failed(session: &'s PageSession, err: SurfaceError) -> Self {
        warn!(error = %err, "settings page initialization failed");
        Self {
            session,
            status: StatusBlock::error(format!("Failed to initialize: {err}")),
            scope: Err(err),
            config: IntegrationConfig::default(),
        }
    }

    /// Returns the form's current configuration.
    #[must_use]
    pub const fn config(&self) -> &IntegrationConfig {
        &self.config
    }

    /// Returns the most recent status message.
    #[must_use]
    pub const fn status(&self) -> &StatusBlock {
        &self.status
    }

    /// Returns the scope settings are saved under, when one was resolved.
    #[must_use]
    pub fn scope(&self) -> Option<&SettingsScope> {
        self.scope.as_ref().ok()
    }

    /// Sets the API key field.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.config.api_key = ApiKey::new(api_key);
    }

    /// Sets the organization id field; a blank value clears it.
    pub fn set_organization_id(&mut self, organization_id: &str) {
        self.config.organization_id =
            (!organization_id.trim().is_empty()).then(|| organization_id.to_owned());
    }

    /// Sets whether commits must reference an issue.
    pub const fn set_require_reference_in_commits(&mut self, required: bool) {
        self.config.require_reference_in_commits = required;
    }

    /// Sets whether pull requests must reference an issue.
    pub const fn set_require_reference_in_pr(&mut self, required: bool) {
        self.config.require_reference_in_pr = required;
    }

    /// Validates and saves the form.
    pub async fn save(&mut self) -> &StatusBlock {
        self.status = match self.try_save().await {
            Ok(source) => with_source_detail(StatusBlock::success(SETTINGS_SAVED), source),
            Err(SurfaceError::Config(err)) => StatusBlock::error(err.to_string()),
            Err(err) => {
                warn!(error = %err, "failed to save settings");
                StatusBlock::error(SETTINGS_SAVE_FAILED).with_detail(err.to_string())
            }
        };
        &self.status
    }

    async fn try_save(&self) -> Result<SettingsSource, SurfaceError> {
        self.config.validate()?;
        let scope = self.scope.as_ref().map_err(Clone::clone)?;
        Ok(self.session.save_settings(scope, &self.config).await?)
    }

    /// Tests the form's API key, saved or not, by listing issues.
    pub async fn test_connection(&mut self) -> &StatusBlock {
        if !self.config.has_credentials() {
            self.status = StatusBlock::error(ENTER_API_KEY);
            return &self.status;
        }
        let tracker = self.session.tracker(&self.config);
        self.status = match tracker.search_by_text("").await {
            Ok(issues) => {
                info!(count = issues.len(), "Linear connection test succeeded");
                StatusBlock::success(format!(
                    "Connection successful! Found {} issues.",
                    issues.len()
                ))
            }
            Err(err) => {
                warn!(error = %err, "Linear connection test failed");
                StatusBlock::error(CONNECTION_FAILED)
            }
        };
        &self.status
    }
}

fn with_source_detail(status: StatusBlock, source: SettingsSource) -> StatusBlock {
    match source {
        SettingsSource::Host => status,
        SettingsSource::LocalFallback => status.with_detail(LOCAL_FALLBACK_DETAIL),
    }
}
