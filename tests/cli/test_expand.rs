//! Tests for the expand CLI command

use crate::common::{create_test_services, TestRepo};
use kbindex::cli::commands::expand::{execute, ExpandArgs};
use kbindex::cli::OutputFormat;
use kbindex::core::types::ExpansionStatus;

/// One batch per invocation
#[tokio::test]
async fn test_expand_single_batch() {
    let (services, client, _state) = create_test_services();
    let repo = TestRepo::go_files(5);

    let args = ExpandArgs {
        path: repo.path().to_path_buf(),
        batch_size: Some(2),
        all: false,
    };

    execute(args, &services, OutputFormat::Human).await.unwrap();
    assert_eq!(client.files().len(), 2);
}

/// --all loops until the project is complete
#[tokio::test]
async fn test_expand_all() {
    let (services, client, _state) = create_test_services();
    let repo = TestRepo::go_files(5);

    let args = ExpandArgs {
        path: repo.path().to_path_buf(),
        batch_size: Some(2),
        all: true,
    };

    execute(args, &services, OutputFormat::Json).await.unwrap();
    assert_eq!(client.files().len(), 5);

    let status = services.scheduler.status(repo.path()).unwrap();
    assert_eq!(status.status, ExpansionStatus::Complete);
}

/// --all stops when only undecodable files remain
#[tokio::test]
async fn test_expand_all_stops_without_progress() {
    let (services, _client, _state) = create_test_services();
    let repo = TestRepo::go_files(1);
    std::fs::write(repo.path().join("pkg/zz_bad.go"), [0xff, 0xfe, 0x00, 0x01]).unwrap();

    let args = ExpandArgs {
        path: repo.path().to_path_buf(),
        batch_size: Some(1),
        all: true,
    };

    execute(args, &services, OutputFormat::Human).await.unwrap();

    let status = services.scheduler.status(repo.path()).unwrap();
    assert_eq!(status.total_indexed, 1);
    assert_eq!(status.status, ExpansionStatus::InProgress);
}

/// A project held by another run is a warning, not a failure
#[tokio::test]
async fn test_expand_locked_project() {
    let (services, client, _state) = create_test_services();
    let repo = TestRepo::go_files(2);

    let store = services.scheduler.store(repo.path()).unwrap();
    let _held = store.lock().unwrap();

    let args = ExpandArgs {
        path: repo.path().to_path_buf(),
        batch_size: None,
        all: false,
    };

    let result = execute(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Locked project should not fail: {:?}", result.err());
    assert!(client.payloads().is_empty());
}
