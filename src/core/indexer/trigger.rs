//! Post-commit trigger.
//!
//! Each commit indexes the files it touched right away. Every
//! `commit_interval`-th commit additionally runs one expansion batch
//! so the unindexed remainder keeps shrinking in the background.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::error::{IndexerError, Result};
use crate::core::indexer::pipeline::ExpansionScheduler;
use crate::core::types::{ChangeReport, ExpansionReport};

const HOOK_MARKER: &str = "kbindex hook";

/// Outcome of one commit event
#[derive(Debug, Clone, Serialize)]
pub struct TriggerReport {
    /// Sequence number of this event for the project
    pub event: u64,

    /// Result of indexing the commit's changed files
    pub changed: ChangeReport,

    /// Present when this event also ran an expansion batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<ExpansionReport>,
}

/// Reacts to commits in a project repository
pub struct CommitTrigger {
    scheduler: Arc<ExpansionScheduler>,
    batch_size: usize,
    commit_interval: u64,
}

impl CommitTrigger {
    pub fn new(scheduler: Arc<ExpansionScheduler>, batch_size: usize, commit_interval: u64) -> Self {
        Self {
            scheduler,
            batch_size,
            commit_interval: commit_interval.max(1),
        }
    }

    /// Handle one commit
    ///
    /// The event counter is bumped under the project lock, then the
    /// lock is released before any indexing starts.
    pub async fn on_commit(&self, project_root: &Path) -> Result<TriggerReport> {
        let store = self.scheduler.store(project_root)?;

        let event = {
            let _lock = store.lock()?;
            let mut state = store.load();
            state.trigger_events += 1;
            state.touch();
            store.save(&state)?;
            state.trigger_events
        };

        let root = store.project_root();
        let paths = changed_files(root).await;
        tracing::info!("Commit event {} touched {} files", event, paths.len());

        let changed = self.scheduler.index_paths(root, &paths).await?;

        let expansion = if event % self.commit_interval == 0 {
            match self.scheduler.expand(root, self.batch_size).await {
                Ok(report) => Some(report),
                Err(e) if e.is_locked() => {
                    tracing::warn!("Skipping expansion for event {}: {}", event, e);
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        Ok(TriggerReport {
            event,
            changed,
            expansion,
        })
    }
}

/// Files changed by `HEAD`, relative to `project_root`
///
/// Returns an empty list with a warning when git is unavailable or
/// the root is not inside a repository.
pub async fn changed_files(project_root: &Path) -> Vec<PathBuf> {
    let output = tokio::process::Command::new("git")
        .arg("-C")
        .arg(project_root)
        .args([
            "diff-tree",
            "--root",
            "--relative",
            "--no-commit-id",
            "--name-only",
            "-r",
            "HEAD",
        ])
        .output()
        .await;

    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect(),
        Ok(out) => {
            tracing::warn!(
                "git diff-tree failed in {:?}: {}",
                project_root,
                String::from_utf8_lossy(&out.stderr).trim()
            );
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("Could not run git: {}", e);
            Vec::new()
        }
    }
}

/// Install a `post-commit` hook that runs `kbindex hook`
///
/// An existing hook is kept and the call is appended to it. Installing
/// twice is a no-op. Returns the hook path.
pub fn install_hook(project_root: &Path) -> Result<PathBuf> {
    let git_dir = project_root.join(".git");
    if !git_dir.is_dir() {
        return Err(IndexerError::GitError(format!(
            "{} is not the root of a git repository",
            project_root.display()
        )));
    }

    let hooks_dir = git_dir.join("hooks");
    fs::create_dir_all(&hooks_dir)?;
    let hook_path = hooks_dir.join("post-commit");

    let invocation = format!(
        "# Added by kbindex\n{HOOK_MARKER} --project \"$(git rev-parse --show-toplevel)\" >/dev/null 2>&1 &\n"
    );

    if hook_path.exists() {
        let existing = fs::read_to_string(&hook_path)?;
        if existing.contains(HOOK_MARKER) {
            tracing::info!("Hook already installed at {:?}", hook_path);
            return Ok(hook_path);
        }
        let separator = if existing.ends_with('\n') { "" } else { "\n" };
        fs::write(&hook_path, format!("{existing}{separator}{invocation}"))?;
    } else {
        fs::write(&hook_path, format!("#!/bin/sh\n{invocation}"))?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&hook_path, fs::Permissions::from_mode(0o755))?;
    }

    tracing::info!("Installed post-commit hook at {:?}", hook_path);
    Ok(hook_path)
}
