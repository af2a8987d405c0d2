//! In-memory settings store for tests and offline runs.

use crate::settings::{
    domain::SettingsScope,
    ports::{SettingsStore, SettingsStoreError, SettingsStoreResult},
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// Thread-safe in-memory settings store.
///
/// Failures can be injected for a number of upcoming calls, or for every
/// call, to exercise retry and fallback paths.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    state: Arc<RwLock<InMemorySettingsState>>,
}

#[derive(Debug, Default)]
struct InMemorySettingsState {
    values: HashMap<(String, String), Value>,
    pending_failures: u32,
    always_fail: Option<String>,
    get_calls: u32,
    set_calls: u32,
}

impl InMemorySettingsState {
    fn take_failure(&mut self) -> SettingsStoreResult<()> {
        if let Some(reason) = &self.always_fail {
            return Err(SettingsStoreError::Unavailable(reason.clone()));
        }
        if self.pending_failures > 0 {
            self.pending_failures -= 1;
            return Err(SettingsStoreError::Unavailable(
                "injected store failure".to_owned(),
            ));
        }
        Ok(())
    }
}

impl InMemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `value` under `scope` and `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsStoreError::Unavailable`] when lock acquisition
    /// fails.
    pub fn insert(
        &self,
        scope: &SettingsScope,
        key: &str,
        value: Value,
    ) -> SettingsStoreResult<()> {
        let mut state = self.write_state()?;
        state
            .values
            .insert((scope.as_str().to_owned(), key.to_owned()), value);
        Ok(())
    }

    /// Makes the next `count` calls fail.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsStoreError::Unavailable`] when lock acquisition
    /// fails.
    pub fn fail_next(&self, count: u32) -> SettingsStoreResult<()> {
        self.write_state()?.pending_failures = count;
        Ok(())
    }

    /// Makes every call fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsStoreError::Unavailable`] when lock acquisition
    /// fails.
    pub fn fail_always(&self, reason: impl Into<String>) -> SettingsStoreResult<()> {
        self.write_state()?.always_fail = Some(reason.into());
        Ok(())
    }

    /// Returns the number of `get_value` and `set_value` calls made.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsStoreError::Unavailable`] when lock acquisition
    /// fails.
    pub fn call_counts(&self) -> SettingsStoreResult<(u32, u32)> {
        let state = self
            .state
            .read()
            .map_err(|err| SettingsStoreError::Unavailable(err.to_string()))?;
        Ok((state.get_calls, state.set_calls))
    }

    fn write_state(&self) -> SettingsStoreResult<RwLockWriteGuard<'_, InMemorySettingsState>> {
        self.state
            .write()
            .map_err(|err| SettingsStoreError::Unavailable(err.to_string()))
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get_value(
        &self,
        scope: &SettingsScope,
        key: &str,
    ) -> SettingsStoreResult<Option<Value>> {
        let mut state = self.write_state()?;
        state.get_calls += 1;
        state.take_failure()?;
        Ok(state
            .values
            .get(&(scope.as_str().to_owned(), key.to_owned()))
            .cloned())
    }

    async fn set_value(
        &self,
        scope: &SettingsScope,
        key: &str,
        value: Value,
    ) -> SettingsStoreResult<()> {
        let mut state = self.write_state()?;
        state.set_calls += 1;
        state.take_failure()?;
        state
            .values
            .insert((scope.as_str().to_owned(), key.to_owned()), value);
        Ok(())
    }
}
