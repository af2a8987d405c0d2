//! Shared world state for reference validation BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use trackline::reference::{
    adapters::memory::InMemoryIssueTracker,
    domain::{IssueSnapshot, IssueState, IssueTeam, ValidationResult},
};

/// Scenario world for reference validation behaviour tests.
pub struct ValidationWorld {
    /// Tracker the scenario validates against.
    pub tracker: Arc<InMemoryIssueTracker>,
    /// Result of the last validation.
    pub result: Option<ValidationResult>,
}

impl ValidationWorld {
    /// Creates a world with an empty, configured tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: Arc::new(InMemoryIssueTracker::new()),
            result: None,
        }
    }

    /// Returns the last validation result.
    pub fn result(&self) -> Result<&ValidationResult, eyre::Report> {
        self.result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no validation has run in this scenario"))
    }
}

impl Default for ValidationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ValidationWorld {
    ValidationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated list of identifiers.
pub fn identifiers(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Builds an issue snapshot for `identifier`.
pub fn issue(identifier: &str) -> IssueSnapshot {
    IssueSnapshot {
        id: format!("uuid-{identifier}"),
        identifier: identifier.to_owned(),
        title: format!("Issue {identifier}"),
        state: IssueState::new("Todo", "unstarted"),
        team: IssueTeam::new("LIN", "Platform"),
        url: format!("https://linear.app/acme/issue/{identifier}"),
    }
}
