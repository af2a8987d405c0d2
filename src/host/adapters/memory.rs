//! In-memory host adapters for tests and the command-line tool.

use crate::host::{
    domain::{ExtensionContext, HostContext, PickedIssue, PullRequest},
    ports::{
        HostError, HostLifecycle, HostResult, SourceControl, SourceControlError,
        SourceControlResult,
    },
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// Lifecycle call recorded by [`InMemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// `init` was called.
    Init,
    /// `ready` was called.
    Ready,
    /// `configuration` was called.
    Configuration,
    /// `extension_context` was called.
    ExtensionContext,
    /// `notify_load_succeeded` was called.
    LoadSucceeded,
    /// `close_dialog` was called with the given identifier.
    DialogClosed(String),
}

/// Scripted extension host.
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    state: Arc<RwLock<InMemoryHostState>>,
}

#[derive(Debug)]
struct InMemoryHostState {
    context: HostContext,
    extension_id: Option<String>,
    ready_failure: Option<String>,
    configuration_failure: Option<String>,
    has_dialog: bool,
    events: Vec<HostEvent>,
    picked: Vec<PickedIssue>,
}

impl InMemoryHost {
    /// Creates a host that injects `context`.
    #[must_use]
    pub fn new(context: HostContext) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryHostState {
                context,
                extension_id: Some("trackline.linear-integration".to_owned()),
                ready_failure: None,
                configuration_failure: None,
                has_dialog: true,
                events: Vec::new(),
                picked: Vec::new(),
            })),
        }
    }

    /// Makes `ready` fail with `reason`.
    #[must_use]
    pub fn failing_ready(self, reason: impl Into<String>) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.ready_failure = Some(reason.into());
        }
        self
    }

    /// Makes `configuration` fail with `reason`.
    #[must_use]
    pub fn failing_configuration(self, reason: impl Into<String>) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.configuration_failure = Some(reason.into());
        }
        self
    }

    /// Removes the extension identity.
    #[must_use]
    pub fn without_extension_id(self) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.extension_id = None;
        }
        self
    }

    /// Removes the hosting dialog.
    #[must_use]
    pub fn without_dialog(self) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.has_dialog = false;
        }
        self
    }

    /// Returns every lifecycle call made so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Configuration`] when lock acquisition fails.
    pub fn events(&self) -> HostResult<Vec<HostEvent>> {
        let state = self
            .state
            .read()
            .map_err(|err| HostError::Configuration(err.to_string()))?;
        Ok(state.events.clone())
    }

    /// Returns how many times the load acknowledgment was sent.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Configuration`] when lock acquisition fails.
    pub fn load_acknowledgments(&self) -> HostResult<usize> {
        Ok(self
            .events()?
            .iter()
            .filter(|event| **event == HostEvent::LoadSucceeded)
            .count())
    }

    /// Returns the issues passed to `close_dialog`.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::Configuration`] when lock acquisition fails.
    pub fn picked_issues(&self) -> HostResult<Vec<PickedIssue>> {
        let state = self
            .state
            .read()
            .map_err(|err| HostError::Configuration(err.to_string()))?;
        Ok(state.picked.clone())
    }

    fn record(&self, event: HostEvent) -> HostResult<RwLockWriteGuard<'_, InMemoryHostState>> {
        let mut state = self
            .state
            .write()
            .map_err(|err| HostError::Configuration(err.to_string()))?;
        state.events.push(event);
        Ok(state)
    }
}

#[async_trait]
impl HostLifecycle for InMemoryHost {
    async fn init(&self) -> HostResult<()> {
        drop(self.record(HostEvent::Init)?);
        Ok(())
    }

    async fn ready(&self) -> HostResult<()> {
        let state = self.record(HostEvent::Ready)?;
        match &state.ready_failure {
            Some(reason) => Err(HostError::Handshake(reason.clone())),
            None => Ok(()),
        }
    }

    fn notify_load_succeeded(&self) -> HostResult<()> {
        drop(self.record(HostEvent::LoadSucceeded)?);
        Ok(())
    }

    async fn configuration(&self) -> HostResult<HostContext> {
        let state = self.record(HostEvent::Configuration)?;
        match &state.configuration_failure {
            Some(reason) => Err(HostError::Configuration(reason.clone())),
            None => Ok(state.context.clone()),
        }
    }

    fn extension_context(&self) -> HostResult<ExtensionContext> {
        let state = self.record(HostEvent::ExtensionContext)?;
        state
            .extension_id
            .clone()
            .map(|id| ExtensionContext { id })
            .ok_or_else(|| HostError::Configuration("extension id not supplied".to_owned()))
    }

    fn close_dialog(&self, picked: &PickedIssue) -> HostResult<()> {
        let mut state = self.record(HostEvent::DialogClosed(picked.identifier.clone()))?;
        if !state.has_dialog {
            return Err(HostError::Dialog("page is not hosted in a dialog".to_owned()));
        }
        state.picked.push(picked.clone());
        Ok(())
    }
}

type PullRequestKey = (String, String, u32);

/// In-memory pull request store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySourceControl {
    state: Arc<RwLock<InMemorySourceControlState>>,
}

#[derive(Debug, Default)]
struct InMemorySourceControlState {
    pull_requests: HashMap<PullRequestKey, PullRequest>,
    failure: Option<String>,
    updates: u32,
}

fn key(project_id: &str, repository_id: &str, pull_request_id: u32) -> PullRequestKey {
    (project_id.to_owned(), repository_id.to_owned(), pull_request_id)
}

impl InMemorySourceControl {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a pull request.
    ///
    /// # Errors
    ///
    /// Returns [`SourceControlError::Unavailable`] when lock acquisition
    /// fails.
    pub fn insert(
        &self,
        project_id: &str,
        repository_id: &str,
        pull_request_id: u32,
        pull_request: PullRequest,
    ) -> SourceControlResult<()> {
        self.write_state()?
            .pull_requests
            .insert(key(project_id, repository_id, pull_request_id), pull_request);
        Ok(())
    }

    /// Makes every call fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceControlError::Unavailable`] when lock acquisition
    /// fails.
    pub fn fail_with(&self, reason: impl Into<String>) -> SourceControlResult<()> {
        self.write_state()?.failure = Some(reason.into());
        Ok(())
    }

    /// Returns the number of description updates applied.
    ///
    /// # Errors
    ///
    /// Returns [`SourceControlError::Unavailable`] when lock acquisition
    /// fails.
    pub fn update_count(&self) -> SourceControlResult<u32> {
        let state = self
            .state
            .read()
            .map_err(|err| SourceControlError::Unavailable(err.to_string()))?;
        Ok(state.updates)
    }

    fn write_state(
        &self,
    ) -> SourceControlResult<RwLockWriteGuard<'_, InMemorySourceControlState>> {
        self.state
            .write()
            .map_err(|err| SourceControlError::Unavailable(err.to_string()))
    }
}

impl InMemorySourceControlState {
    fn check_failure(&self) -> SourceControlResult<()> {
        match &self.failure {
            Some(reason) => Err(SourceControlError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

fn not_found(repository_id: &str, pull_request_id: u32) -> SourceControlError {
    SourceControlError::NotFound {
        repository_id: repository_id.to_owned(),
        pull_request_id,
    }
}

#[async_trait]
impl SourceControl for InMemorySourceControl {
    async fn pull_request(
        &self,
        project_id: &str,
        repository_id: &str,
        pull_request_id: u32,
    ) -> SourceControlResult<PullRequest> {
        let state = self
            .state
            .read()
            .map_err(|err| SourceControlError::Unavailable(err.to_string()))?;
        state.check_failure()?;
        state
            .pull_requests
            .get(&key(project_id, repository_id, pull_request_id))
            .cloned()
            .ok_or_else(|| not_found(repository_id, pull_request_id))
    }

    async fn update_pull_request_description(
        &self,
        project_id: &str,
        repository_id: &str,
        pull_request_id: u32,
        description: &str,
    ) -> SourceControlResult<()> {
        let mut state = self.write_state()?;
        state.check_failure()?;
        let pull_request = state
            .pull_requests
            .get_mut(&key(project_id, repository_id, pull_request_id))
            .ok_or_else(|| not_found(repository_id, pull_request_id))?;
        description.clone_into(&mut pull_request.description);
        state.updates += 1;
        Ok(())
    }
}
