//! Tests for the seed and status CLI commands

use crate::common::{create_test_services, TestRepo};
use kbindex::cli::commands::seed::{execute, SeedArgs};
use kbindex::cli::commands::status::{self, StatusArgs};
use kbindex::cli::OutputFormat;

/// Seeding with an explicit limit
#[tokio::test]
async fn test_seed_human() {
    let (services, client, _state) = create_test_services();
    let repo = TestRepo::go_files(5);

    let args = SeedArgs {
        path: repo.path().to_path_buf(),
        limit: Some(2),
        force: false,
    };

    let result = execute(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Seed should succeed: {:?}", result.err());
    assert_eq!(client.files().len(), 2);
}

/// Default limit comes from configuration
#[tokio::test]
async fn test_seed_default_limit_json() {
    let (services, client, _state) = create_test_services();
    let repo = TestRepo::go_files(3);

    let args = SeedArgs {
        path: repo.path().to_path_buf(),
        limit: None,
        force: false,
    };

    let result = execute(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok());
    assert_eq!(client.files().len(), 3);
}

/// Second seed without --force does nothing
#[tokio::test]
async fn test_seed_twice_is_noop() {
    let (services, client, _state) = create_test_services();
    let repo = TestRepo::go_files(4);

    for _ in 0..2 {
        let args = SeedArgs {
            path: repo.path().to_path_buf(),
            limit: Some(2),
            force: false,
        };
        execute(args, &services, OutputFormat::Human).await.unwrap();
    }

    assert_eq!(client.payloads().len(), 2);
}

/// Zero limit is a usage error
#[tokio::test]
async fn test_seed_zero_limit() {
    let (services, _client, _state) = create_test_services();
    let repo = TestRepo::go_files(1);

    let args = SeedArgs {
        path: repo.path().to_path_buf(),
        limit: Some(0),
        force: false,
    };

    let result = execute(args, &services, OutputFormat::Human).await;
    assert!(result.is_err());
}

/// Seeding a missing directory fails
#[tokio::test]
async fn test_seed_invalid_path() {
    let (services, _client, _state) = create_test_services();

    let args = SeedArgs {
        path: "/nonexistent/kbindex/project".into(),
        limit: None,
        force: false,
    };

    let result = execute(args, &services, OutputFormat::Human).await;
    assert!(result.is_err());
}

/// Status on a fresh project and after seeding
#[tokio::test]
async fn test_status_both_formats() {
    let (services, client, _state) = create_test_services();
    let repo = TestRepo::go_files(2);

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = StatusArgs {
            path: repo.path().to_path_buf(),
        };
        assert!(status::execute(args, &services, format).await.is_ok());
    }

    services.scheduler.seed(repo.path(), 1, false).await.unwrap();
    let args = StatusArgs {
        path: repo.path().to_path_buf(),
    };
    assert!(status::execute(args, &services, OutputFormat::Human)
        .await
        .is_ok());

    // Status never ingests
    assert_eq!(client.files().len(), 1);
}
