//! Shared world state for settings fallback BDD scenarios.

use std::sync::Arc;

use camino::Utf8Path;
use rstest::fixture;
use tempfile::TempDir;
use trackline::settings::{
    adapters::{local::LocalSettingsStore, memory::InMemorySettingsStore},
    domain::{IntegrationConfig, SETTINGS_KEY, SettingsScope},
    ports::SettingsStore,
    services::{LoadedSettings, SettingsService, SettingsSource},
};

/// Service type used by the BDD world.
pub type TestSettingsService = SettingsService<InMemorySettingsStore, LocalSettingsStore>;

/// Scenario world for settings fallback behaviour tests.
pub struct SettingsWorld {
    /// Scripted host store.
    pub host: Arc<InMemorySettingsStore>,
    /// File-backed fallback store.
    pub local: Arc<LocalSettingsStore>,
    /// Service under test.
    pub service: TestSettingsService,
    /// Scope every scenario works in.
    pub scope: SettingsScope,
    /// Result of the last load.
    pub loaded: Option<LoadedSettings>,
    /// Result of the last save.
    pub saved: Option<SettingsSource>,
    _dir: TempDir,
}

impl SettingsWorld {
    /// Creates a world with an empty host store and a fresh directory.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temporary directory should be created");
        let root = Utf8Path::from_path(dir.path()).expect("temporary path should be UTF-8");
        let local = Arc::new(LocalSettingsStore::open(root).expect("local store should open"));
        let host = Arc::new(InMemorySettingsStore::new());
        let service = SettingsService::new(Arc::clone(&host), Arc::clone(&local));
        Self {
            host,
            local,
            service,
            scope: SettingsScope::new("project-1").expect("scope should be valid"),
            loaded: None,
            saved: None,
            _dir: dir,
        }
    }

    /// Reads the API key stored in `store` for the scenario scope.
    pub fn stored_key(&self, store: &dyn SettingsStore) -> Result<Option<String>, eyre::Report> {
        let value = run_async(store.get_value(&self.scope, SETTINGS_KEY))
            .map_err(|err| eyre::eyre!("store read failed: {err}"))?;
        value
            .map(|json| {
                serde_json::from_value::<IntegrationConfig>(json)
                    .map(|config| config.api_key.expose().to_owned())
                    .map_err(|err| eyre::eyre!("stored value is malformed: {err}"))
            })
            .transpose()
    }
}

impl Default for SettingsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SettingsWorld {
    SettingsWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Serializes a configuration holding `api_key`.
pub fn config_value(api_key: &str) -> Result<serde_json::Value, eyre::Report> {
    serde_json::to_value(IntegrationConfig::with_api_key(api_key))
        .map_err(|err| eyre::eyre!("config should serialize: {err}"))
}
