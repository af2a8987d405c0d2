//! Linear tracker adapter.
//!
//! [`LinearTracker`] accepts credentials synchronously and builds the HTTP
//! client only on the first lookup or search, so pages that only read
//! configuration never touch the network.

mod client;
mod wire;

pub use client::{LINEAR_API_URL, LinearClient};
pub use wire::{
    CredentialCheck, GraphQlResponse, IssueData, LinearOrganization, LinearViewer,
    SEARCH_PAGE_SIZE, SearchData, decode_credentials, decode_issue, decode_search,
};

use crate::reference::{
    domain::{IssueReference, IssueSnapshot},
    ports::{IssueTracker, TrackerError, TrackerResult},
};
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Observable connection phase of a [`LinearTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No API key was supplied.
    Unconfigured,
    /// An API key is held but no client has been built yet.
    Configured,
    /// The HTTP client has been built.
    Connected,
}

enum ConnectionState {
    Unconfigured,
    Configured { api_key: String },
    Connected(Arc<LinearClient>),
}

impl ConnectionState {
    const fn status(&self) -> ConnectionStatus {
        match self {
            Self::Unconfigured => ConnectionStatus::Unconfigured,
            Self::Configured { .. } => ConnectionStatus::Configured,
            Self::Connected(_) => ConnectionStatus::Connected,
        }
    }
}

/// Tracker capability backed by the Linear GraphQL API.
pub struct LinearTracker {
    endpoint: String,
    initialized: bool,
    state: Mutex<ConnectionState>,
}

impl fmt::Debug for LinearTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearTracker")
            .field("endpoint", &self.endpoint)
            .field("status", &self.connection_status())
            .finish()
    }
}

impl LinearTracker {
    /// Creates a tracker for the production endpoint.
    ///
    /// A blank key yields an unconfigured tracker.
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        Self::with_endpoint(api_key, LINEAR_API_URL)
    }

    /// Creates a tracker for a custom endpoint, such as a proxy.
    #[must_use]
    pub fn with_endpoint(api_key: &str, endpoint: impl Into<String>) -> Self {
        let trimmed = api_key.trim();
        let state = if trimmed.is_empty() {
            ConnectionState::Unconfigured
        } else {
            ConnectionState::Configured {
                api_key: trimmed.to_owned(),
            }
        };
        Self {
            endpoint: endpoint.into(),
            initialized: !trimmed.is_empty(),
            state: Mutex::new(state),
        }
    }

    /// Creates a tracker without credentials.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::new("")
    }

    /// Returns the current connection phase.
    #[must_use]
    pub fn connection_status(&self) -> ConnectionStatus {
        self.state
            .lock()
            .map_or(ConnectionStatus::Unconfigured, |state| state.status())
    }

    /// Builds the HTTP client on first use and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotConfigured`] without credentials and
    /// [`TrackerError::Connect`] when the client cannot be built.
    pub fn connect(&self) -> TrackerResult<Arc<LinearClient>> {
        let mut state = self
            .state
            .lock()
            .map_err(|err| TrackerError::Unavailable(err.to_string()))?;
        let api_key = match &*state {
            ConnectionState::Connected(client) => return Ok(Arc::clone(client)),
            ConnectionState::Unconfigured => return Err(TrackerError::NotConfigured),
            ConnectionState::Configured { api_key } => api_key.clone(),
        };
        let client = Arc::new(LinearClient::connect(&api_key, &self.endpoint)?);
        *state = ConnectionState::Connected(Arc::clone(&client));
        info!(endpoint = %self.endpoint, "Linear client connected");
        Ok(client)
    }

    /// Verifies the API key by fetching the viewer and organization.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the key is missing or rejected.
    pub async fn verify_credentials(&self) -> TrackerResult<CredentialCheck> {
        let client = self.connect()?;
        client.verify().await
    }
}

#[async_trait]
impl IssueTracker for LinearTracker {
    async fn lookup_by_id(&self, issue_id: &str) -> TrackerResult<Option<IssueSnapshot>> {
        let client = self.connect()?;
        let fallback_team_key = IssueReference::parse(issue_id)
            .map(|reference| reference.team_key().as_str().to_owned())
            .unwrap_or_default();
        debug!(issue_id, "fetching Linear issue");
        client.issue(issue_id, &fallback_team_key).await
    }

    async fn search_by_text(&self, query: &str) -> TrackerResult<Vec<IssueSnapshot>> {
        let client = self.connect()?;
        debug!(query, "searching Linear issues");
        client.search(query).await
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}
