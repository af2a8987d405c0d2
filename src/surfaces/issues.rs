//! Issue list loading and filtering shared by the PR create helper and the
//! issue picker.

use super::{PageLoad, PageSession, SurfaceError};
use crate::reference::domain::IssueSnapshot;
use tracing::info;

/// Placeholder shown when no issue matches.
pub const NO_ISSUES_FOUND: &str = "No issues found";

/// Loads every issue visible to the configured key.
///
/// # Errors
///
/// Returns [`SurfaceError`] when the host, settings or tracker fail.
pub async fn load_issues(
    session: &PageSession,
    page: &PageLoad<'_>,
) -> Result<Vec<IssueSnapshot>, SurfaceError> {
    let context = page.handshake().await?;
    let config = session.require_config(&context).await?;
    let issues = session.tracker(&config).search_by_text("").await?;
    info!(count = issues.len(), "loaded Linear issues");
    Ok(issues)
}

/// Fields an issue filter may match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// Identifier and title.
    Summary,
    /// Identifier, title, state name and team name.
    Everything,
}

/// Returns `true` when `issue` matches `query`, ignoring case.
///
/// An empty query matches every issue.
#[must_use]
pub fn matches_query(issue: &IssueSnapshot, query: &str, scope: FilterScope) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let contains = |field: &str| field.to_lowercase().contains(&needle);
    contains(&issue.identifier)
        || contains(&issue.title)
        || (scope == FilterScope::Everything
            && (contains(&issue.state.name) || contains(&issue.team.name)))
}
