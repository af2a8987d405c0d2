//! Tracker capability port for issue lookup and search.

use crate::reference::domain::IssueSnapshot;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Remote issue tracker contract.
///
/// Implementations make a single attempt per call and never retry
/// internally.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Looks up an issue by its human-facing identifier.
    ///
    /// Returns `Ok(None)` when the tracker answered but has no such issue.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the tracker could not be reached or
    /// returned an unusable response.
    async fn lookup_by_id(&self, issue_id: &str) -> TrackerResult<Option<IssueSnapshot>>;

    /// Searches issues whose title contains `query`.
    ///
    /// An empty query returns the tracker's default listing.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] when the tracker could not be reached or
    /// returned an unusable response.
    async fn search_by_text(&self, query: &str) -> TrackerResult<Vec<IssueSnapshot>>;

    /// Reports whether credentials were supplied.
    fn is_initialized(&self) -> bool;
}

/// Errors returned by tracker adapters.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// No credentials were configured.
    #[error("Linear client not initialized")]
    NotConfigured,

    /// The underlying client could not be constructed.
    #[error("Failed to initialize Linear client")]
    Connect(Arc<dyn std::error::Error + Send + Sync>),

    /// The request did not complete.
    #[error("Linear API request failed: {0}")]
    Request(Arc<dyn std::error::Error + Send + Sync>),

    /// The tracker answered with a non-success HTTP status.
    #[error("Linear API error {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body as text.
        body: String,
    },

    /// The tracker reported GraphQL errors.
    #[error("Linear GraphQL errors: {0}")]
    GraphQl(String),

    /// The response could not be decoded.
    #[error("Failed to parse Linear response: {0}")]
    Decode(String),

    /// The tracker is unavailable for another reason.
    #[error("{0}")]
    Unavailable(String),
}

impl TrackerError {
    /// Wraps a client construction error.
    pub fn connect(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connect(Arc::new(err))
    }

    /// Wraps a transport error.
    pub fn request(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Request(Arc::new(err))
    }
}
