//! Error types and error handling for kbindex.
//!
//! Only catastrophic conditions (unusable project root, unwritable
//! state, lock contention) are meant to propagate out of an
//! expansion. Per-file and per-chunk failures are recovered where
//! they happen and surface as counters in the progress report.

use thiserror::Error;

/// Result type alias for kbindex operations
pub type Result<T> = std::result::Result<T, IndexerError>;

/// Main error type for kbindex
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Chunking failed: {0}")]
    ChunkingFailed(String),

    #[error("Ingestion failed: {0}")]
    IngestionFailed(String),

    #[error("Ingestion timed out after {0}s")]
    IngestionTimeout(u64),

    #[error("Project is locked by another indexing run: {0}")]
    ProjectLocked(String),

    #[error("State error: {0}")]
    StateError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Git error: {0}")]
    GitError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl IndexerError {
    /// Check if this error came from the ingestion target
    ///
    /// Ingestion failures are counted per chunk and never abort
    /// a batch.
    pub fn is_ingestion(&self) -> bool {
        matches!(
            self,
            IndexerError::IngestionFailed(_) | IndexerError::IngestionTimeout(_)
        )
    }

    /// Check if another run currently owns the project state
    pub fn is_locked(&self) -> bool {
        matches!(self, IndexerError::ProjectLocked(_))
    }

    /// Check if this is a bad input error (invalid path or config)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            IndexerError::InvalidPath(_) | IndexerError::ConfigError(_)
        )
    }
}

impl From<reqwest::Error> for IndexerError {
    fn from(err: reqwest::Error) -> Self {
        IndexerError::IngestionFailed(err.to_string())
    }
}
