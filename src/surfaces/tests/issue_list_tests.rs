//! PR create helper and issue picker tests.

use super::fixtures::{Harness, issue, pr_context};
use crate::host::{
    adapters::memory::{HostEvent, InMemoryHost},
    domain::PickedIssue,
    ports::HostError,
};
use crate::reference::{
    adapters::memory::TrackerCall,
    domain::{IssueSnapshot, IssueState, IssueTeam},
};
use crate::surfaces::{
    FilterScope, NO_ISSUES_FOUND, StatusLevel, SurfaceError, matches_query,
    picker::{IssuePicker, PICKER_LOAD_FAILED, open_picker, pick_and_close},
    pr_create::{IssueSelection, PR_CREATE_LOAD_FAILED, open_pr_create},
};
use rstest::{fixture, rstest};

#[fixture]
fn issues() -> Vec<IssueSnapshot> {
    vec![
        issue("LIN-1", "Fix login redirect"),
        IssueSnapshot {
            state: IssueState::new("Done", "completed"),
            team: IssueTeam::new("OPS", "Operations"),
            ..issue("OPS-7", "Rotate certificates")
        },
        issue("LIN-2", "Add search box"),
    ]
}

fn identifiers(visible: &[&IssueSnapshot]) -> Vec<String> {
    visible.iter().map(|issue| issue.identifier.clone()).collect()
}

#[rstest]
#[case("", FilterScope::Summary, true)]
#[case("ops-7", FilterScope::Summary, true)]
#[case("ROTATE", FilterScope::Summary, true)]
#[case("operations", FilterScope::Summary, false)]
#[case("operations", FilterScope::Everything, true)]
#[case("done", FilterScope::Everything, true)]
#[case("nothing", FilterScope::Everything, false)]
fn filter_matches_case_insensitively(
    issues: Vec<IssueSnapshot>,
    #[case] query: &str,
    #[case] scope: FilterScope,
    #[case] expected: bool,
) {
    let ops = issues
        .iter()
        .find(|issue| issue.identifier == "OPS-7")
        .expect("fixture should contain OPS-7");

    assert_eq!(matches_query(ops, query, scope), expected);
}

#[rstest]
fn selection_filters_by_identifier_and_title(issues: Vec<IssueSnapshot>) {
    let mut selection = IssueSelection::new(issues);

    selection.set_query("lin");
    assert_eq!(identifiers(&selection.visible()), ["LIN-1", "LIN-2"]);

    selection.set_query("operations");
    assert!(selection.visible().is_empty());
    assert_eq!(selection.placeholder(), Some(NO_ISSUES_FOUND));
}

#[rstest]
fn selection_toggles_and_keeps_list_order(issues: Vec<IssueSnapshot>) {
    let mut selection = IssueSelection::new(issues);

    assert!(selection.toggle("uuid-LIN-2"));
    assert!(selection.toggle("uuid-LIN-1"));
    assert!(selection.toggle("uuid-OPS-7"));
    assert!(!selection.toggle("uuid-OPS-7"));
    assert!(!selection.toggle("uuid-missing"));

    assert_eq!(identifiers(&selection.selected()), ["LIN-1", "LIN-2"]);
    assert!(!selection.is_selected("uuid-OPS-7"));
    assert_eq!(selection.heading().as_deref(), Some("Selected Issues (2)"));
    assert_eq!(
        selection.markdown(),
        "[LIN-1](https://linear.app/acme/issue/LIN-1) - Fix login redirect\n\
         [LIN-2](https://linear.app/acme/issue/LIN-2) - Add search box"
    );
}

#[rstest]
fn empty_selection_has_no_heading(issues: Vec<IssueSnapshot>) {
    let selection = IssueSelection::new(issues);

    assert_eq!(selection.heading(), None);
    assert_eq!(selection.markdown(), "");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pr_create_loads_all_issues() {
    let harness = Harness::configured(InMemoryHost::new(pr_context()));

    let selection = open_pr_create(&harness.session)
        .await
        .expect("issues should load");

    assert_eq!(selection.issues().len(), 3);
    assert_eq!(
        harness.tracker.calls().expect("calls should be readable"),
        [TrackerCall::Search(String::new())]
    );
    assert_eq!(harness.acknowledgments(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pr_create_tracker_failure_asks_to_check_the_key() {
    let harness = Harness::configured(InMemoryHost::new(pr_context()));
    harness
        .tracker
        .fail_search("timeout")
        .expect("failure should be injectable");

    let status = open_pr_create(&harness.session)
        .await
        .expect_err("load should fail");

    assert_eq!(status.level(), StatusLevel::Error);
    assert_eq!(status.title(), PR_CREATE_LOAD_FAILED);
    assert_eq!(harness.acknowledgments(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pr_create_host_failure_reports_initialization() {
    let host = InMemoryHost::new(pr_context()).failing_configuration("no context");
    let harness = Harness::configured(host);

    let status = open_pr_create(&harness.session)
        .await
        .expect_err("load should fail");

    assert_eq!(
        status.title(),
        "Failed to initialize Linear integration: host configuration unavailable: no context"
    );
    assert_eq!(harness.acknowledgments(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pr_create_without_settings_warns() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));

    let status = open_pr_create(&harness.session)
        .await
        .expect_err("load should fail");

    assert_eq!(status.level(), StatusLevel::Warning);
}

#[rstest]
fn picker_filters_on_state_and_team(issues: Vec<IssueSnapshot>) {
    let mut picker = IssuePicker::new(issues);

    picker.set_query("Operations");
    assert_eq!(identifiers(&picker.visible()), ["OPS-7"]);

    picker.set_query("in progress");
    assert_eq!(identifiers(&picker.visible()), ["LIN-1", "LIN-2"]);

    picker.set_query("zzz");
    assert_eq!(picker.placeholder(), Some(NO_ISSUES_FOUND));
}

#[rstest]
fn picking_returns_display_fields(issues: Vec<IssueSnapshot>) {
    let picker = IssuePicker::new(issues);

    assert_eq!(
        picker.pick("OPS-7"),
        Some(PickedIssue {
            identifier: "OPS-7".to_owned(),
            title: "Rotate certificates".to_owned(),
            url: "https://linear.app/acme/issue/OPS-7".to_owned(),
            state: "Done".to_owned(),
            team: "Operations".to_owned(),
        })
    );
    assert_eq!(picker.pick("LIN-404"), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn picked_issue_closes_the_dialog() {
    let harness = Harness::configured(InMemoryHost::new(pr_context()));
    let picker = open_picker(&harness.session)
        .await
        .expect("issues should load");

    let picked =
        pick_and_close(harness.session.host(), &picker, "LIN-2").expect("pick should succeed");

    assert_eq!(picked.identifier, "LIN-2");
    assert_eq!(
        harness.host.picked_issues().expect("picks should be readable"),
        [picked]
    );
    assert!(
        harness
            .host
            .events()
            .expect("events should be readable")
            .contains(&HostEvent::DialogClosed("LIN-2".to_owned()))
    );
}

#[rstest]
fn unknown_pick_leaves_the_dialog_open(issues: Vec<IssueSnapshot>) {
    let host = InMemoryHost::new(pr_context());
    let picker = IssuePicker::new(issues);

    let result = pick_and_close(&host, &picker, "LIN-404");

    assert!(matches!(result, Err(SurfaceError::UnknownIssue(id)) if id == "LIN-404"));
    assert!(host.picked_issues().expect("picks should be readable").is_empty());
}

#[rstest]
fn pick_outside_a_dialog_fails(issues: Vec<IssueSnapshot>) {
    let host = InMemoryHost::new(pr_context()).without_dialog();
    let picker = IssuePicker::new(issues);

    let result = pick_and_close(&host, &picker, "LIN-1");

    assert!(matches!(
        result,
        Err(SurfaceError::Host(HostError::Dialog(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn picker_failure_uses_a_single_message() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));

    let status = open_picker(&harness.session)
        .await
        .expect_err("load should fail");

    assert_eq!(status.title(), PICKER_LOAD_FAILED);
    assert_eq!(status.detail(), Some("Linear API key not configured"));
    assert_eq!(harness.acknowledgments(), 1);
}
