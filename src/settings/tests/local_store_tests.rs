//! Tests for the local JSON-file settings store.

use crate::settings::{
    adapters::local::LocalSettingsStore,
    domain::{SETTINGS_KEY, SettingsScope},
    ports::{SettingsStore, SettingsStoreError},
};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

struct LocalFixture {
    _temp: TempDir,
    root: Utf8PathBuf,
    store: LocalSettingsStore,
}

#[fixture]
fn local() -> LocalFixture {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let root = Utf8PathBuf::from_path_buf(temp.path().join("settings"))
        .expect("temp path should be UTF-8");
    let store = LocalSettingsStore::open(&root).expect("store should open");
    LocalFixture {
        _temp: temp,
        root,
        store,
    }
}

fn scope(value: &str) -> SettingsScope {
    SettingsScope::new(value).expect("scope should be valid")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_file_reads_as_absent(local: LocalFixture) {
    let value = local
        .store
        .get_value(&scope("project-1"), SETTINGS_KEY)
        .await
        .expect("read should succeed");

    assert_eq!(value, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn written_value_reads_back_and_lands_under_scope(local: LocalFixture) {
    let project = scope("Team Project");
    let blob = json!({ "apiKey": "lin_api_key" });

    local
        .store
        .set_value(&project, SETTINGS_KEY, blob.clone())
        .await
        .expect("write should succeed");
    let value = local
        .store
        .get_value(&project, SETTINGS_KEY)
        .await
        .expect("read should succeed");

    assert_eq!(value, Some(blob));
    assert!(local.root.join("Team_Project").join("linear-config.json").is_file());
    assert_eq!(local.store.root(), local.root);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn last_write_wins(local: LocalFixture) {
    let project = scope("p");
    for key in ["first", "second"] {
        local
            .store
            .set_value(&project, SETTINGS_KEY, json!({ "apiKey": key }))
            .await
            .expect("write should succeed");
    }

    let value = local
        .store
        .get_value(&project, SETTINGS_KEY)
        .await
        .expect("read should succeed");

    assert_eq!(value, Some(json!({ "apiKey": "second" })));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_file_is_a_serialization_error(local: LocalFixture) {
    let project = scope("p");
    std::fs::create_dir_all(local.root.join("p")).expect("scope dir should be created");
    std::fs::write(local.root.join("p").join("linear-config.json"), "{not json")
        .expect("corrupt file should be written");

    let result = local.store.get_value(&project, SETTINGS_KEY).await;

    assert!(matches!(result, Err(SettingsStoreError::Serialization(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn traversal_in_scope_stays_inside_root(local: LocalFixture) {
    let project = scope("../escape");

    local
        .store
        .set_value(&project, SETTINGS_KEY, json!({}))
        .await
        .expect("write should succeed");

    assert!(local.root.join("_.._escape").join("linear-config.json").is_file());
}
