//! Source-control data port for pull requests.

use crate::host::domain::PullRequest;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for source-control operations.
pub type SourceControlResult<T> = Result<T, SourceControlError>;

/// Pull request access offered by the source-control host.
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// Reads a pull request's title and description.
    ///
    /// # Errors
    ///
    /// Returns [`SourceControlError`] when the pull request does not exist
    /// or the service cannot be reached.
    async fn pull_request(
        &self,
        project_id: &str,
        repository_id: &str,
        pull_request_id: u32,
    ) -> SourceControlResult<PullRequest>;

    /// Replaces a pull request's description.
    ///
    /// # Errors
    ///
    /// Returns [`SourceControlError`] when the pull request does not exist
    /// or the update is rejected.
    async fn update_pull_request_description(
        &self,
        project_id: &str,
        repository_id: &str,
        pull_request_id: u32,
        description: &str,
    ) -> SourceControlResult<()>;
}

/// Errors returned by source-control adapters.
#[derive(Debug, Clone, Error)]
pub enum SourceControlError {
    /// No such pull request.
    #[error("pull request {pull_request_id} not found in repository {repository_id}")]
    NotFound {
        /// Repository id.
        repository_id: String,
        /// Pull request id.
        pull_request_id: u32,
    },

    /// The service could not be reached.
    #[error("source control unavailable: {0}")]
    Unavailable(String),

    /// The request failed in the transport layer.
    #[error("source control request failed: {0}")]
    Request(Arc<dyn std::error::Error + Send + Sync>),
}

impl SourceControlError {
    /// Wraps a transport error.
    pub fn request(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Request(Arc::new(err))
    }
}
