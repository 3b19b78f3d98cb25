// Persisted progress across independent runs

use crate::common::{RecordingClient, TestRepo};
use kbindex::core::config::Config;
use kbindex::core::services::Services;
use kbindex::core::storage::{project_key, IndexStateStore, SCHEMA_VERSION};
use std::sync::Arc;
use tempfile::TempDir;

fn services_at(state_dir: &std::path::Path) -> (Services, Arc<RecordingClient>) {
    let mut config = Config::default();
    config.storage.state_dir = state_dir.to_path_buf();
    let client = Arc::new(RecordingClient::default());
    (Services::with_client(config, client.clone()).unwrap(), client)
}

#[tokio::test]
async fn test_progress_survives_restart() {
    let repo = TestRepo::go_files(6);
    let state_dir = TempDir::new().unwrap();

    let (first, first_client) = services_at(state_dir.path());
    first.scheduler.expand(repo.path(), 4).await.unwrap();
    drop(first);

    let (second, second_client) = services_at(state_dir.path());
    let report = second.scheduler.expand(repo.path(), 4).await.unwrap();

    assert_eq!(report.files_indexed_this_batch, 2);
    assert_eq!(report.total_indexed, 6);

    // No file is sent by both runs
    let overlap: Vec<_> = first_client
        .files()
        .intersection(&second_client.files())
        .cloned()
        .collect();
    assert!(overlap.is_empty(), "re-ingested: {overlap:?}");
}

#[tokio::test]
async fn test_state_file_contents() {
    let repo = TestRepo::go_files(2);
    let state_dir = TempDir::new().unwrap();
    let (services, _client) = services_at(state_dir.path());

    services.scheduler.expand(repo.path(), 1).await.unwrap();

    let store = IndexStateStore::new(state_dir.path(), repo.path()).unwrap();
    let raw = std::fs::read_to_string(store.state_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["schema_version"], SCHEMA_VERSION);
    assert_eq!(json["total_files"], 2);
    assert_eq!(json["indexed_files"], serde_json::json!(["pkg/file_00.go"]));
}

#[tokio::test]
async fn test_corrupt_state_restarts_from_scratch() {
    let repo = TestRepo::go_files(2);
    let state_dir = TempDir::new().unwrap();
    let (services, client) = services_at(state_dir.path());

    let store = IndexStateStore::new(state_dir.path(), repo.path()).unwrap();
    std::fs::create_dir_all(store.project_dir()).unwrap();
    std::fs::write(store.state_path(), "{ not json").unwrap();

    let report = services.scheduler.expand(repo.path(), 10).await.unwrap();
    assert_eq!(report.files_indexed_this_batch, 2);
    assert_eq!(client.files().len(), 2);
}

#[test]
fn test_projects_get_distinct_state_directories() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();

    assert_ne!(project_key(a.path()), project_key(b.path()));
    assert_eq!(project_key(a.path()), project_key(a.path()));
}
