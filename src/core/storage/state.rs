//! Persistent per-project index state.
//!
//! Records which repository-relative paths have been indexed. The
//! record is rewritten in full on every save, through a temp file and
//! a rename so a crash never leaves a torn file behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::error::{IndexerError, Result};
use crate::core::storage::lock::ProjectLock;

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

const STATE_FILE_NAME: &str = "index_state.json";
const LOCK_FILE_NAME: &str = ".lock";

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Indexing progress for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexState {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub project_root: PathBuf,

    /// Repository-relative paths already pushed to the ingestion target
    #[serde(default)]
    pub indexed_files: BTreeSet<String>,

    /// Candidate set size at the last computation
    #[serde(default)]
    pub total_files: usize,

    #[serde(default = "Utc::now")]
    pub initialized_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub last_updated_at: DateTime<Utc>,

    /// Commit events observed by the hook
    #[serde(default)]
    pub trigger_events: u64,
}

impl IndexState {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let now = Utc::now();
        Self {
            schema_version: SCHEMA_VERSION,
            project_root: project_root.into(),
            indexed_files: BTreeSet::new(),
            total_files: 0,
            initialized_at: now,
            last_updated_at: now,
            trigger_events: 0,
        }
    }

    pub fn is_indexed(&self, path: &str) -> bool {
        self.indexed_files.contains(path)
    }

    /// Drop indexed entries that are no longer candidates
    ///
    /// Returns the number of entries removed.
    pub fn retain_present(&mut self, present: &HashSet<&str>) -> usize {
        let before = self.indexed_files.len();
        self.indexed_files.retain(|path| present.contains(path.as_str()));
        before - self.indexed_files.len()
    }

    pub fn touch(&mut self) {
        self.last_updated_at = Utc::now();
    }
}

/// Loads and saves [`IndexState`] for one project
#[derive(Debug, Clone)]
pub struct IndexStateStore {
    project_root: PathBuf,
    project_dir: PathBuf,
}

impl IndexStateStore {
    /// Store for `project_root`, keeping files under `state_root`
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::InvalidPath`] if the project root cannot
    /// be resolved.
    pub fn new(state_root: &Path, project_root: &Path) -> Result<Self> {
        let canonical = project_root.canonicalize().map_err(|e| {
            IndexerError::InvalidPath(format!("{}: {e}", project_root.display()))
        })?;
        let project_dir = state_root.join(project_key(&canonical));

        Ok(Self {
            project_root: canonical,
            project_dir,
        })
    }

    /// Canonical project root
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Directory holding this project's state
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn state_path(&self) -> PathBuf {
        self.project_dir.join(STATE_FILE_NAME)
    }

    /// Take the project's exclusive writer lock
    pub fn lock(&self) -> Result<ProjectLock> {
        ProjectLock::try_acquire(&self.project_dir.join(LOCK_FILE_NAME))
    }

    /// Load the persisted state
    ///
    /// Missing, unreadable, or corrupt state yields a fresh empty record.
    pub fn load(&self) -> IndexState {
        let path = self.state_path();
        if !path.exists() {
            return IndexState::new(&self.project_root);
        }

        let parsed = fs::read_to_string(&path)
            .map_err(IndexerError::from)
            .and_then(|contents| serde_json::from_str::<IndexState>(&contents).map_err(Into::into));

        match parsed {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Ignoring unreadable index state {:?}: {}", path, e);
                IndexState::new(&self.project_root)
            }
        }
    }

    /// Atomically rewrite the persisted state
    pub fn save(&self, state: &IndexState) -> Result<()> {
        fs::create_dir_all(&self.project_dir)?;

        let path = self.state_path();
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_vec_pretty(state)?;

        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&tmp);
            IndexerError::StateError(format!("Failed to write {}: {e}", path.display()))
        })?;

        tracing::debug!(
            "Saved index state ({} files) to {:?}",
            state.indexed_files.len(),
            path
        );
        Ok(())
    }

    /// Delete the persisted state, if any
    pub fn reset(&self) -> Result<()> {
        let path = self.state_path();
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::info!("Reset index state for {:?}", self.project_root);
        }
        Ok(())
    }
}

/// Stable directory name for a project
///
/// Format: `{sanitized-dir-name}-{first 16 hex chars of sha256(path)}`.
pub fn project_key(canonical_root: &Path) -> String {
    let name: String = canonical_root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("project")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let name = if name.is_empty() { "project".to_string() } else { name };

    let digest = Sha256::digest(canonical_root.to_string_lossy().as_bytes());
    let hash = hex::encode(digest);

    format!("{}-{}", name, &hash[..16])
}
