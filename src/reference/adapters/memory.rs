//! In-memory tracker adapter for tests and offline runs.

use crate::reference::{
    domain::IssueSnapshot,
    ports::{IssueTracker, TrackerError, TrackerResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// Tracker call recorded by [`InMemoryIssueTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    /// A lookup for the given identifier.
    Lookup(String),
    /// A search with the given query.
    Search(String),
}

/// Thread-safe in-memory tracker.
///
/// Issues are seeded up front; individual identifiers can be made to fail
/// and every call is recorded so tests can assert on ordering.
#[derive(Debug, Clone)]
pub struct InMemoryIssueTracker {
    state: Arc<RwLock<InMemoryTrackerState>>,
    initialized: bool,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    issues: Vec<IssueSnapshot>,
    failures: HashMap<String, String>,
    search_failure: Option<String>,
    calls: Vec<TrackerCall>,
}

impl InMemoryIssueTracker {
    /// Creates an initialized tracker with no issues.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTrackerState::default())),
            initialized: true,
        }
    }

    /// Creates a tracker that reports missing credentials.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            initialized: false,
            ..Self::new()
        }
    }

    /// Creates an initialized tracker seeded with `issues`.
    #[must_use]
    pub fn with_issues(issues: impl IntoIterator<Item = IssueSnapshot>) -> Self {
        let tracker = Self::new();
        if let Ok(mut state) = tracker.state.write() {
            state.issues.extend(issues);
        }
        tracker
    }

    /// Adds or replaces an issue, keyed by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Unavailable`] when lock acquisition fails.
    pub fn insert_issue(&self, issue: IssueSnapshot) -> TrackerResult<()> {
        let mut state = self.write_state()?;
        state
            .issues
            .retain(|existing| existing.identifier != issue.identifier);
        state.issues.push(issue);
        Ok(())
    }

    /// Makes lookups of `issue_id` fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Unavailable`] when lock acquisition fails.
    pub fn fail_lookup(
        &self,
        issue_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> TrackerResult<()> {
        let mut state = self.write_state()?;
        state.failures.insert(issue_id.into(), reason.into());
        Ok(())
    }

    /// Makes every search fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Unavailable`] when lock acquisition fails.
    pub fn fail_search(&self, reason: impl Into<String>) -> TrackerResult<()> {
        let mut state = self.write_state()?;
        state.search_failure = Some(reason.into());
        Ok(())
    }

    /// Returns every call made so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Unavailable`] when lock acquisition fails.
    pub fn calls(&self) -> TrackerResult<Vec<TrackerCall>> {
        let state = self
            .state
            .read()
            .map_err(|err| TrackerError::Unavailable(err.to_string()))?;
        Ok(state.calls.clone())
    }

    fn write_state(&self) -> TrackerResult<RwLockWriteGuard<'_, InMemoryTrackerState>> {
        self.state
            .write()
            .map_err(|err| TrackerError::Unavailable(err.to_string()))
    }
}

impl Default for InMemoryIssueTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssueTracker for InMemoryIssueTracker {
    async fn lookup_by_id(&self, issue_id: &str) -> TrackerResult<Option<IssueSnapshot>> {
        let mut state = self.write_state()?;
        state.calls.push(TrackerCall::Lookup(issue_id.to_owned()));
        if let Some(reason) = state.failures.get(issue_id) {
            return Err(TrackerError::Unavailable(reason.clone()));
        }
        Ok(state
            .issues
            .iter()
            .find(|issue| issue.identifier == issue_id)
            .cloned())
    }

    async fn search_by_text(&self, query: &str) -> TrackerResult<Vec<IssueSnapshot>> {
        let mut state = self.write_state()?;
        state.calls.push(TrackerCall::Search(query.to_owned()));
        if let Some(reason) = &state.search_failure {
            return Err(TrackerError::Unavailable(reason.clone()));
        }
        Ok(state
            .issues
            .iter()
            .filter(|issue| issue.title.contains(query))
            .cloned()
            .collect())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}
