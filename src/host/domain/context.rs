//! Host page context and source-control records.

use serde::{Deserialize, Serialize};

const SHORT_COMMIT_ID_LEN: usize = 7;
const UNKNOWN_COMMIT_ID: &str = "unknown";

/// A commit supplied by the host to the commit-policy page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommitInfo {
    /// Commit hash.
    pub commit_id: Option<String>,
    /// Commit comment as reported by the host.
    pub comment: Option<String>,
    /// Commit message, used when no comment is present.
    pub message: Option<String>,
}

impl CommitInfo {
    /// Creates a commit with an id and comment.
    #[must_use]
    pub fn new(commit_id: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            commit_id: Some(commit_id.into()),
            comment: Some(comment.into()),
            message: None,
        }
    }

    /// Returns the text to validate: the comment, else the message.
    #[must_use]
    pub fn text(&self) -> &str {
        [&self.comment, &self.message]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }

    /// Returns the first seven characters of the id, or `unknown`.
    #[must_use]
    pub fn short_id(&self) -> String {
        match self.commit_id.as_deref() {
            Some(id) if !id.is_empty() => id.chars().take(SHORT_COMMIT_ID_LEN).collect(),
            _ => UNKNOWN_COMMIT_ID.to_owned(),
        }
    }
}

/// Context injected by the host into a page.
///
/// Which fields are present depends on the contribution point: pull
/// request pages carry repository and pull request ids, commit policy pages
/// carry commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostContext {
    /// Project id.
    pub project_id: Option<String>,
    /// Git repository id.
    pub repository_id: Option<String>,
    /// Pull request id.
    pub pull_request_id: Option<u32>,
    /// Commits under evaluation.
    pub commits: Vec<CommitInfo>,
}

impl HostContext {
    /// Returns the project, repository and pull request ids when all are
    /// present.
    #[must_use]
    pub fn pull_request_target(&self) -> Option<(&str, &str, u32)> {
        let project_id = self.project_id.as_deref().filter(|id| !id.is_empty())?;
        let repository_id = self.repository_id.as_deref().filter(|id| !id.is_empty())?;
        let pull_request_id = self.pull_request_id.filter(|id| *id > 0)?;
        Some((project_id, repository_id, pull_request_id))
    }
}

/// Identity of the running extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionContext {
    /// Fully qualified extension id.
    pub id: String,
}

/// Title and description of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    /// Pull request title.
    pub title: String,
    /// Pull request description.
    pub description: String,
}

impl PullRequest {
    /// Creates a pull request record.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Returns the text scanned for references: title, newline, description.
    #[must_use]
    pub fn reference_text(&self) -> String {
        format!("{}\n{}", self.title, self.description)
    }
}

/// Issue returned to the host dialog by the issue picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedIssue {
    /// Issue identifier, such as `LIN-123`.
    pub identifier: String,
    /// Issue title.
    pub title: String,
    /// Browser URL.
    pub url: String,
    /// Workflow state name.
    pub state: String,
    /// Team name.
    pub team: String,
}
