//! Tests for the commit-driven CLI commands
//!
//! - index-files: explicit changed files
//! - hook: post-commit entry point
//! - install-hook: hook installation

use crate::common::{create_test_services, TestRepo};
use kbindex::cli::commands::hook::{self, HookArgs};
use kbindex::cli::commands::index_files::{self, IndexFilesArgs};
use kbindex::cli::commands::install_hook::{self, InstallHookArgs};
use kbindex::cli::OutputFormat;

/// Index two files relative to the project root
#[tokio::test]
async fn test_index_files() {
    let (services, client, _state) = create_test_services();
    let repo = TestRepo::mixed();

    let args = IndexFilesArgs {
        files: vec!["src/store.rs".into(), "docs/guide.md".into()],
        project: repo.path().to_path_buf(),
    };

    let result = index_files::execute(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "index-files failed: {:?}", result.err());
    assert_eq!(client.files().len(), 2);
}

/// Outside a repository the hook sees no changes but still counts the event
#[tokio::test]
async fn test_hook_without_git_history() {
    let (services, client, _state) = create_test_services();
    let repo = TestRepo::go_files(1);

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let args = HookArgs {
            project: repo.path().to_path_buf(),
        };
        hook::execute(args, &services, format).await.unwrap();
    }

    assert!(client.payloads().is_empty());
    let state = services.scheduler.store(repo.path()).unwrap().load();
    assert_eq!(state.trigger_events, 2);
}

/// Locked project: hook exits cleanly without counting the event
#[tokio::test]
async fn test_hook_locked_project() {
    let (services, _client, _state) = create_test_services();
    let repo = TestRepo::go_files(1);

    let store = services.scheduler.store(repo.path()).unwrap();
    let held = store.lock().unwrap();

    let args = HookArgs {
        project: repo.path().to_path_buf(),
    };
    assert!(hook::execute(args, &services, OutputFormat::Human)
        .await
        .is_ok());
    drop(held);

    assert_eq!(store.load().trigger_events, 0);
}

/// install-hook writes an executable post-commit script
#[test]
fn test_install_hook() {
    let repo = TestRepo::with_files(&[(".git/HEAD", "ref: refs/heads/main\n")]);

    let args = InstallHookArgs {
        path: repo.path().to_path_buf(),
    };
    install_hook::execute(args, OutputFormat::Human).unwrap();

    let hook = repo.path().join(".git/hooks/post-commit");
    let contents = std::fs::read_to_string(&hook).unwrap();
    assert!(contents.contains("kbindex hook --project"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&hook).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

/// install-hook outside a repository fails
#[test]
fn test_install_hook_not_a_repository() {
    let repo = TestRepo::go_files(1);

    let args = InstallHookArgs {
        path: repo.path().to_path_buf(),
    };
    assert!(install_hook::execute(args, OutputFormat::Json).is_err());
}
