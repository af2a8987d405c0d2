//! Issue selection while creating a pull request.

use super::{
    FilterScope, NO_ISSUES_FOUND, PageSession, StatusBlock, SurfaceError, configuration_warning,
    load_issues, matches_query,
};
use crate::reference::domain::IssueSnapshot;
use std::collections::HashSet;
use tracing::warn;

/// Title shown when the issue list cannot be fetched.
pub const PR_CREATE_LOAD_FAILED: &str =
    "Failed to load Linear issues. Please check your API key configuration.";

/// Filterable, multi-select list of issues for a new pull request.
#[derive(Debug, Clone, Default)]
pub struct IssueSelection {
    issues: Vec<IssueSnapshot>,
    query: String,
    selected: HashSet<String>,
}

impl IssueSelection {
    /// Creates a selection over `issues` with nothing selected.
    #[must_use]
    pub fn new(issues: Vec<IssueSnapshot>) -> Self {
        Self {
            issues,
            query: String::new(),
            selected: HashSet::new(),
        }
    }

    /// Returns every loaded issue.
    #[must_use]
    pub fn issues(&self) -> &[IssueSnapshot] {
        &self.issues
    }

    /// Replaces the filter query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Returns the current filter query.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns issues whose identifier or title matches the query.
    #[must_use]
    pub fn visible(&self) -> Vec<&IssueSnapshot> {
        self.issues
            .iter()
            .filter(|issue| matches_query(issue, &self.query, FilterScope::Summary))
            .collect()
    }

    /// Returns the placeholder to show when the filtered list is empty.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.visible().is_empty().then_some(NO_ISSUES_FOUND)
    }

    /// Toggles selection of the issue with tracker id `issue_id`.
    ///
    /// Returns whether the issue is selected afterwards; unknown ids are
    /// ignored and report `false`.
    pub fn toggle(&mut self, issue_id: &str) -> bool {
        if !self.issues.iter().any(|issue| issue.id == issue_id) {
            return false;
        }
        if self.selected.remove(issue_id) {
            false
        } else {
            self.selected.insert(issue_id.to_owned());
            true
        }
    }

    /// Returns `true` when `issue_id` is selected.
    #[must_use]
    pub fn is_selected(&self, issue_id: &str) -> bool {
        self.selected.contains(issue_id)
    }

    /// Returns selected issues in list order.
    #[must_use]
    pub fn selected(&self) -> Vec<&IssueSnapshot> {
        self.issues
            .iter()
            .filter(|issue| self.selected.contains(&issue.id))
            .collect()
    }

    /// Returns the `Selected Issues (n)` heading, or `None` when nothing is
    /// selected.
    #[must_use]
    pub fn heading(&self) -> Option<String> {
        let count = self.selected.len();
        (count > 0).then(|| format!("Selected Issues ({count})"))
    }

    /// Renders the selection as markdown lines for the PR description.
    #[must_use]
    pub fn markdown(&self) -> String {
        self.selected()
            .into_iter()
            .map(IssueSnapshot::markdown_reference)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Opens the PR create helper.
///
/// Returns the selection, or the status block to show instead when the
/// integration is unconfigured or the issues cannot be loaded.
///
/// # Errors
///
/// The error value is a rendered [`StatusBlock`], never a raw failure.
pub async fn open_pr_create(session: &PageSession) -> Result<IssueSelection, StatusBlock> {
    let mut page = session.begin();
    let loaded = load_issues(session, &page).await;
    page.acknowledge();
    loaded.map(IssueSelection::new).map_err(|err| match err {
        SurfaceError::NotConfigured => configuration_warning(),
        SurfaceError::Tracker(_) => {
            warn!(error = %err, "failed to load Linear issues");
            StatusBlock::error(PR_CREATE_LOAD_FAILED)
        }
        _ => {
            warn!(error = %err, "PR create helper initialization failed");
            StatusBlock::error(format!("Failed to initialize Linear integration: {err}"))
        }
    })
}
