// Seed and expansion scenarios against a recording ingestion target

use crate::common::{create_test_services, TestRepo};
use kbindex::core::types::ExpansionStatus;

#[tokio::test]
async fn test_seed_then_expand_to_completion() {
    let repo = TestRepo::mixed();
    let (services, client, _state) = create_test_services();

    let seeded = services.scheduler.seed(repo.path(), 3, false).await.unwrap();
    assert_eq!(seeded.files_indexed_this_batch, 3);
    assert_eq!(seeded.total_files, 8);
    assert_eq!(seeded.percentage, 37);
    assert_eq!(seeded.status, ExpansionStatus::InProgress);

    // Seed picks source files only, in path order
    let files: Vec<String> = client.files().into_iter().collect();
    assert_eq!(files, vec!["app/models.py", "src/main.rs", "src/store.rs"]);

    let second = services.scheduler.expand(repo.path(), 3).await.unwrap();
    assert_eq!(second.files_indexed_this_batch, 3);
    assert_eq!(second.total_indexed, 6);
    assert!(client.files().contains("web/app.js"));
    assert!(client.files().contains("config/app.toml"));
    assert!(client.files().contains("package.json"));

    let third = services.scheduler.expand(repo.path(), 3).await.unwrap();
    assert_eq!(third.files_indexed_this_batch, 2);
    assert_eq!(third.percentage, 100);
    assert_eq!(third.status, ExpansionStatus::Complete);

    let noop = services.scheduler.expand(repo.path(), 3).await.unwrap();
    assert!(noop.is_noop());
    assert_eq!(noop.status, ExpansionStatus::Complete);
}

#[tokio::test]
async fn test_excluded_paths_never_ingested() {
    let repo = TestRepo::mixed();
    let (services, client, _state) = create_test_services();

    let report = services.scheduler.expand(repo.path(), 100).await.unwrap();
    assert_eq!(report.status, ExpansionStatus::Complete);

    let files = client.files();
    assert_eq!(files.len(), 8);
    assert!(files.iter().all(|f| !f.starts_with("node_modules/")));
    assert!(files.iter().all(|f| !f.starts_with(".git/")));
    assert!(!files.contains("logo.png"));
}

#[tokio::test]
async fn test_new_files_join_the_remaining_set() {
    let repo = TestRepo::go_files(4);
    let (services, _client, _state) = create_test_services();

    let report = services.scheduler.expand(repo.path(), 10).await.unwrap();
    assert_eq!(report.status, ExpansionStatus::Complete);

    repo.write("pkg/file_99.go", "package pkg\n\nfunc Late() {}\n");
    let status = services.scheduler.status(repo.path()).unwrap();
    assert_eq!(status.total_files, 5);
    assert_eq!(status.total_indexed, 4);
    assert_eq!(status.status, ExpansionStatus::InProgress);

    let report = services.scheduler.expand(repo.path(), 10).await.unwrap();
    assert_eq!(report.files_indexed_this_batch, 1);
    assert_eq!(report.status, ExpansionStatus::Complete);
}

#[tokio::test]
async fn test_deleted_files_are_pruned_from_progress() {
    let repo = TestRepo::go_files(4);
    let (services, _client, _state) = create_test_services();

    services.scheduler.expand(repo.path(), 2).await.unwrap();
    std::fs::remove_file(repo.path().join("pkg/file_00.go")).unwrap();

    let status = services.scheduler.status(repo.path()).unwrap();
    assert_eq!(status.total_files, 3);

    let report = services.scheduler.expand(repo.path(), 2).await.unwrap();
    assert_eq!(report.total_indexed, 3);
    assert_eq!(report.status, ExpansionStatus::Complete);
}

#[tokio::test]
async fn test_json_report_shape() {
    let repo = TestRepo::go_files(2);
    let (services, _client, _state) = create_test_services();

    let report = services.scheduler.expand(repo.path(), 1).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["files_indexed_this_batch"], 1);
    assert_eq!(json["total_files"], 2);
    assert_eq!(json["percentage"], 50);
    assert_eq!(json["status"], "in_progress");
}
