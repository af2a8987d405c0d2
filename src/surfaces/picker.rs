//! Single-issue picker shown in a host dialog.

use super::{
    FilterScope, NO_ISSUES_FOUND, PageSession, StatusBlock, SurfaceError, load_issues,
    matches_query,
};
use crate::host::{domain::PickedIssue, ports::HostLifecycle};
use crate::reference::domain::IssueSnapshot;
use tracing::{info, warn};

/// Title shown when the picker cannot load issues.
pub const PICKER_LOAD_FAILED: &str =
    "Failed to load Linear issues. Please check your configuration.";

/// Filterable list from which one issue is picked.
#[derive(Debug, Clone, Default)]
pub struct IssuePicker {
    issues: Vec<IssueSnapshot>,
    query: String,
}

impl IssuePicker {
    /// Creates a picker over `issues`.
    #[must_use]
    pub const fn new(issues: Vec<IssueSnapshot>) -> Self {
        Self {
            issues,
            query: String::new(),
        }
    }

    /// Replaces the filter query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Returns issues whose identifier, title, state or team matches.
    #[must_use]
    pub fn visible(&self) -> Vec<&IssueSnapshot> {
        self.issues
            .iter()
            .filter(|issue| matches_query(issue, &self.query, FilterScope::Everything))
            .collect()
    }

    /// Returns the placeholder to show when the filtered list is empty.
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        self.visible().is_empty().then_some(NO_ISSUES_FOUND)
    }

    /// Looks up a loaded issue by identifier, ignoring the filter.
    #[must_use]
    pub fn pick(&self, identifier: &str) -> Option<PickedIssue> {
        self.issues
            .iter()
            .find(|issue| issue.identifier == identifier)
            .map(|issue| PickedIssue {
                identifier: issue.identifier.clone(),
                title: issue.title.clone(),
                url: issue.url.clone(),
                state: issue.state.name.clone(),
                team: issue.team.name.clone(),
            })
    }
}

/// Opens the picker.
///
/// # Errors
///
/// Any failure, including missing credentials, is returned as the
/// picker's load-failure [`StatusBlock`].
pub async fn open_picker(session: &PageSession) -> Result<IssuePicker, StatusBlock> {
    let mut page = session.begin();
    let loaded = load_issues(session, &page).await;
    page.acknowledge();
    loaded.map(IssuePicker::new).map_err(|err| {
        warn!(error = %err, "issue picker failed to load");
        StatusBlock::error(PICKER_LOAD_FAILED).with_detail(err.to_string())
    })
}

/// Picks `identifier` and returns it to the host dialog.
///
/// # Errors
///
/// Returns [`SurfaceError::UnknownIssue`] for identifiers that were not
/// loaded and [`SurfaceError::Host`] when the dialog cannot be closed.
pub fn pick_and_close(
    host: &dyn HostLifecycle,
    picker: &IssuePicker,
    identifier: &str,
) -> Result<PickedIssue, SurfaceError> {
    let picked = picker
        .pick(identifier)
        .ok_or_else(|| SurfaceError::UnknownIssue(identifier.to_owned()))?;
    host.close_dialog(&picked)?;
    info!(identifier, "picked Linear issue");
    Ok(picked)
}
