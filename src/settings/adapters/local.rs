//! Local JSON-file settings store.
//!
//! Each value is written to `<root>/<scope>/<key>.json`. The root directory
//! is opened once with ambient authority; every later access is relative to
//! that capability, so scope and key names cannot escape it.

use crate::settings::{
    domain::{SettingsScope, safe_file_stem},
    ports::{SettingsStore, SettingsStoreError, SettingsStoreResult},
};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;
use std::io::ErrorKind;
use std::sync::Arc;
use tracing::debug;

const FILE_EXTENSION: &str = "json";

/// Settings store backed by JSON files under a local directory.
#[derive(Debug, Clone)]
pub struct LocalSettingsStore {
    root: Utf8PathBuf,
    dir: Arc<Dir>,
}

impl LocalSettingsStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsStoreError::Persistence`] when the directory cannot
    /// be created or opened.
    pub fn open(root: &Utf8Path) -> SettingsStoreResult<Self> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .map_err(SettingsStoreError::persistence)?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(SettingsStoreError::persistence)?;
        Ok(Self {
            root: root.to_owned(),
            dir: Arc::new(dir),
        })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn relative_path(scope: &SettingsScope, key: &str) -> Utf8PathBuf {
        let file_name = format!("{}.{FILE_EXTENSION}", safe_file_stem(key));
        Utf8PathBuf::from(scope.file_stem()).join(file_name)
    }
}

#[async_trait]
impl SettingsStore for LocalSettingsStore {
    async fn get_value(
        &self,
        scope: &SettingsScope,
        key: &str,
    ) -> SettingsStoreResult<Option<Value>> {
        let path = Self::relative_path(scope, key);
        let contents = match self.dir.read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(%path, "no local settings file");
                return Ok(None);
            }
            Err(err) => return Err(SettingsStoreError::persistence(err)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| SettingsStoreError::Serialization(err.to_string()))
    }

    async fn set_value(
        &self,
        scope: &SettingsScope,
        key: &str,
        value: Value,
    ) -> SettingsStoreResult<()> {
        let path = Self::relative_path(scope, key);
        let contents = serde_json::to_string_pretty(&value)
            .map_err(|err| SettingsStoreError::Serialization(err.to_string()))?;
        self.dir
            .create_dir_all(scope.file_stem())
            .map_err(SettingsStoreError::persistence)?;
        self.dir
            .write(&path, contents)
            .map_err(SettingsStoreError::persistence)?;
        debug!(%path, "wrote local settings file");
        Ok(())
    }
}
