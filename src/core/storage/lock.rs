//! Per-project advisory lock.
//!
//! Serializes state writers for one project across processes. The
//! lock is an OS-level exclusive lock on `{project-dir}/.lock` and is
//! released when the guard drops.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::core::error::{IndexerError, Result};

/// RAII guard for the project lock
#[derive(Debug)]
pub struct ProjectLock {
    path: PathBuf,
    file: File,
}

impl ProjectLock {
    /// Try to take the lock without blocking
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ProjectLocked`] if another holder has it.
    pub fn try_acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        file.try_lock_exclusive()
            .map_err(|_| IndexerError::ProjectLocked(path.display().to_string()))?;

        tracing::debug!("Acquired project lock {:?}", path);

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        tracing::debug!("Released project lock {:?}", self.path);
    }
}
