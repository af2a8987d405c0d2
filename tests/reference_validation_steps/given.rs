//! Given steps for reference validation BDD scenarios.

use std::sync::Arc;

use super::world::{ValidationWorld, identifiers, issue};
use rstest_bdd_macros::given;
use trackline::reference::adapters::memory::InMemoryIssueTracker;

#[given(r#"a tracker with issues "{list}""#)]
fn a_tracker_with_issues(world: &mut ValidationWorld, list: String) {
    let issues = identifiers(&list).iter().map(|id| issue(id)).collect::<Vec<_>>();
    world.tracker = Arc::new(InMemoryIssueTracker::with_issues(issues));
}

#[given("an unconfigured tracker")]
fn an_unconfigured_tracker(world: &mut ValidationWorld) {
    world.tracker = Arc::new(InMemoryIssueTracker::unconfigured());
}

#[given(r#"lookups of "{issue_id}" fail with "{reason}""#)]
fn lookups_fail(
    world: &mut ValidationWorld,
    issue_id: String,
    reason: String,
) -> Result<(), eyre::Report> {
    world
        .tracker
        .fail_lookup(issue_id, reason)
        .map_err(|err| eyre::eyre!("failure injection failed: {err}"))
}
