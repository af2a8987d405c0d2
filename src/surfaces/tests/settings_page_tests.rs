//! Settings page tests.

use super::fixtures::{Harness, PROJECT_ID, pr_context, scope};
use crate::host::{
    adapters::memory::{HostEvent, InMemoryHost},
    domain::HostContext,
};
use crate::settings::{
    domain::{IntegrationConfig, SETTINGS_KEY},
    ports::SettingsStore,
};
use crate::surfaces::{
    StatusLevel,
    settings_page::{
        CONNECTION_FAILED, ENTER_API_KEY, NO_SAVED_SETTINGS, SETTINGS_LOADED,
        SETTINGS_SAVE_FAILED, SETTINGS_SAVED, SettingsPage,
    },
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_opens_with_defaults() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));

    let page = SettingsPage::open(&harness.session).await;

    assert_eq!(page.status().level(), StatusLevel::Info);
    assert_eq!(page.status().title(), NO_SAVED_SETTINGS);
    assert_eq!(page.config(), &IntegrationConfig::default());
    assert_eq!(page.scope().map(|scope| scope.as_str()), Some(PROJECT_ID));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_settings_populate_the_form() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));
    let stored = IntegrationConfig {
        organization_id: Some("org-1".to_owned()),
        require_reference_in_pr: false,
        ..IntegrationConfig::with_api_key("lin_api_saved")
    };
    harness.store_config(&stored);

    let page = SettingsPage::open(&harness.session).await;

    assert_eq!(page.status().level(), StatusLevel::Success);
    assert_eq!(page.status().title(), SETTINGS_LOADED);
    assert_eq!(page.config(), &stored);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn acknowledgment_follows_the_handshake() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));

    let page = SettingsPage::open(&harness.session).await;
    drop(page);

    assert_eq!(
        harness.host.events().expect("events should be readable"),
        [
            HostEvent::Init,
            HostEvent::Ready,
            HostEvent::Configuration,
            HostEvent::LoadSucceeded,
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_handshake_reports_initialization_error() {
    let harness = Harness::new(InMemoryHost::new(pr_context()).failing_ready("timeout"));

    let mut page = SettingsPage::open(&harness.session).await;

    assert_eq!(
        page.status().title(),
        "Failed to initialize: host handshake failed: timeout"
    );
    assert_eq!(harness.acknowledgments(), 1);

    page.set_api_key("lin_api_new");
    let status = page.save().await;
    assert_eq!(status.title(), SETTINGS_SAVE_FAILED);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn extension_scope_is_used_without_a_project() {
    let harness = Harness::new(InMemoryHost::new(HostContext::default()));

    let page = SettingsPage::open(&harness.session).await;

    assert_eq!(
        page.scope().map(|scope| scope.as_str()),
        Some("trackline.linear-integration")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn extension_scope_is_resolved_once() {
    let harness = Harness::new(InMemoryHost::new(HostContext::default()));

    let page = SettingsPage::open(&harness.session).await;
    drop(page);

    let lookups = harness
        .host
        .events()
        .expect("events should be readable")
        .into_iter()
        .filter(|event| *event == HostEvent::ExtensionContext)
        .count();
    assert_eq!(lookups, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_key_is_rejected_without_writing() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));
    let mut page = SettingsPage::open(&harness.session).await;

    page.set_api_key("   ");
    let status = page.save().await;

    assert_eq!(status.level(), StatusLevel::Error);
    assert_eq!(status.title(), "Linear API key is required");
    let (_, sets) = harness
        .host_store
        .call_counts()
        .expect("counts should be readable");
    assert_eq!(sets, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_form_is_written_to_the_host_store() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));
    let mut page = SettingsPage::open(&harness.session).await;

    page.set_api_key("lin_api_new");
    page.set_organization_id("  ");
    page.set_require_reference_in_commits(false);
    page.set_require_reference_in_pr(true);
    let status = page.save().await.clone();

    assert_eq!(status.title(), SETTINGS_SAVED);
    assert_eq!(status.detail(), None);
    let stored = harness
        .host_store
        .get_value(&scope(), SETTINGS_KEY)
        .await
        .expect("read should succeed")
        .expect("value should be stored");
    let config: IntegrationConfig =
        serde_json::from_value(stored).expect("stored value should decode");
    assert_eq!(config.api_key.expose(), "lin_api_new");
    assert_eq!(config.organization_id, None);
    assert!(!config.require_reference_in_commits);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn host_store_outage_saves_locally() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));
    harness
        .host_store
        .fail_always("quota exceeded")
        .expect("failure should be injectable");
    let mut page = SettingsPage::open(&harness.session).await;
    assert_eq!(page.status().title(), NO_SAVED_SETTINGS);

    page.set_api_key("lin_api_new");
    let status = page.save().await;

    assert_eq!(status.title(), SETTINGS_SAVED);
    assert!(status.detail().is_some());
    assert!(
        harness
            .fallback_store
            .get_value(&scope(), SETTINGS_KEY)
            .await
            .expect("read should succeed")
            .is_some()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn connection_test_needs_a_key() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));
    let mut page = SettingsPage::open(&harness.session).await;

    let status = page.test_connection().await;

    assert_eq!(status.title(), ENTER_API_KEY);
    assert!(
        harness
            .tracker
            .calls()
            .expect("calls should be readable")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn connection_test_counts_issues() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));
    let mut page = SettingsPage::open(&harness.session).await;
    page.set_api_key("lin_api_unsaved");

    let status = page.test_connection().await;

    assert_eq!(status.level(), StatusLevel::Success);
    assert_eq!(status.title(), "Connection successful! Found 3 issues.");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn connection_test_failure_is_reported() {
    let harness = Harness::new(InMemoryHost::new(pr_context()));
    harness
        .tracker
        .fail_search("401 unauthorized")
        .expect("failure should be injectable");
    let mut page = SettingsPage::open(&harness.session).await;
    page.set_api_key("lin_api_bad");

    let status = page.test_connection().await;

    assert_eq!(status.level(), StatusLevel::Error);
    assert_eq!(status.title(), CONNECTION_FAILED);
}
