//! Resolved issue data returned by the tracker.

use serde::{Deserialize, Serialize};

/// Placeholder used when the tracker omits a state or team name.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Workflow state of a resolved issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueState {
    /// Display name, such as `In Progress`.
    pub name: String,
    /// Workflow category, such as `started` or `completed`.
    #[serde(rename = "type")]
    pub state_type: String,
}

impl IssueState {
    /// Creates a state from its name and category.
    #[must_use]
    pub fn new(name: impl Into<String>, state_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state_type: state_type.into(),
        }
    }

    /// State used when the tracker returns no state.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_NAME, UNKNOWN_NAME)
    }
}

/// Team owning a resolved issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueTeam {
    /// Team key, such as `LIN`.
    pub key: String,
    /// Team display name.
    pub name: String,
}

impl IssueTeam {
    /// Creates a team from its key and name.
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Snapshot of a Linear issue as resolved by the tracker.
///
/// The validation pipeline carries this data through without interpreting
/// it; surfaces use it for display and linking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSnapshot {
    /// Tracker-internal identifier.
    pub id: String,
    /// Human-facing identifier, such as `LIN-123`.
    pub identifier: String,
    /// Issue title.
    pub title: String,
    /// Workflow state.
    pub state: IssueState,
    /// Owning team.
    pub team: IssueTeam,
    /// Browser URL of the issue.
    pub url: String,
}

impl IssueSnapshot {
    /// Renders the issue as a markdown reference line for descriptions.
    ///
    /// # Examples
    ///
    /// ```
    /// use trackline::reference::domain::{IssueSnapshot, IssueState, IssueTeam};
    ///
    /// let issue = IssueSnapshot {
    ///     id: "uuid-1".to_owned(),
    ///     identifier: "LIN-1".to_owned(),
    ///     title: "Fix login".to_owned(),
    ///     state: IssueState::new("Todo", "unstarted"),
    ///     team: IssueTeam::new("LIN", "Linear"),
    ///     url: "https://linear.app/acme/issue/LIN-1".to_owned(),
    /// };
    /// assert_eq!(
    ///     issue.markdown_reference(),
    ///     "[LIN-1](https://linear.app/acme/issue/LIN-1) - Fix login"
    /// );
    /// ```
    #[must_use]
    pub fn markdown_reference(&self) -> String {
        format!("[{}]({}) - {}", self.identifier, self.url, self.title)
    }
}
