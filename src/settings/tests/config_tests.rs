//! Tests for the persisted configuration shape.

use crate::settings::domain::{
    ApiKey, ConfigValidationError, IntegrationConfig, SettingsScope,
};
use rstest::rstest;
use serde_json::json;

#[test]
fn defaults_enforce_both_policies() {
    let config = IntegrationConfig::default();

    assert!(config.require_reference_in_commits);
    assert!(config.require_reference_in_pr);
    assert!(!config.has_credentials());
}

#[test]
fn serializes_with_camel_case_names() {
    let config = IntegrationConfig {
        organization_id: Some("org-1".to_owned()),
        require_reference_in_pr: false,
        ..IntegrationConfig::with_api_key("lin_api_key")
    };

    let value = serde_json::to_value(&config).expect("config should serialize");

    assert_eq!(
        value,
        json!({
            "apiKey": "lin_api_key",
            "organizationId": "org-1",
            "requireReferenceInCommits": true,
            "requireReferenceInPR": false,
        })
    );
}

#[test]
fn accepts_legacy_policy_names_and_partial_blobs() {
    let config: IntegrationConfig = serde_json::from_value(json!({
        "apiKey": "lin_api_key",
        "requireWorkItemInCommits": false,
    }))
    .expect("legacy blob should deserialize");

    assert_eq!(config.api_key, ApiKey::new("lin_api_key"));
    assert!(!config.require_reference_in_commits);
    assert!(config.require_reference_in_pr);
    assert_eq!(config.organization_id(), None);
}

#[rstest]
#[case::empty("")]
#[case::whitespace("   \t")]
fn blank_api_key_fails_validation(#[case] key: &str) {
    let config = IntegrationConfig::with_api_key(key);

    assert_eq!(config.validate(), Err(ConfigValidationError::MissingApiKey));
    assert_eq!(
        ConfigValidationError::MissingApiKey.to_string(),
        "Linear API key is required"
    );
}

#[test]
fn blank_organization_id_reads_as_absent() {
    let config = IntegrationConfig {
        organization_id: Some("  ".to_owned()),
        ..IntegrationConfig::default()
    };

    assert_eq!(config.organization_id(), None);
}

#[test]
fn api_key_debug_is_redacted() {
    let config = IntegrationConfig::with_api_key("lin_api_secret");

    let rendered = format!("{config:?}");

    assert!(!rendered.contains("lin_api_secret"));
    assert!(rendered.contains("<redacted>"));
}

#[rstest]
#[case("project-1", "project-1")]
#[case("My Project/42", "My_Project_42")]
#[case("..", "_..")]
#[case(".hidden", "_.hidden")]
fn scope_file_stem_is_a_single_safe_segment(#[case] raw: &str, #[case] expected: &str) {
    let scope = SettingsScope::new(raw).expect("scope should be valid");

    assert_eq!(scope.file_stem(), expected);
}

#[test]
fn blank_scope_is_rejected() {
    assert_eq!(SettingsScope::new(" "), Err(ConfigValidationError::EmptyScope));
}
