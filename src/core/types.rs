//! Core data types for kbindex.
//!
//! Chunks and file candidates are transient: they are produced
//! and consumed within a single run and never persisted by the
//! pipeline. Reports are serializable for the CLI's JSON output.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of logical unit a chunk represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkKind {
    /// A function or method body
    Function,
    /// A class-like declaration (class, struct, trait, impl, ...)
    Class,
    /// Unattributed text, e.g. the preamble before any declaration
    Block,
    /// The whole file as a single chunk
    File,
}

impl ChunkKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Block => "block",
            Self::File => "file",
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A logically bounded span of a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeChunk {
    /// What kind of construct this chunk covers
    pub kind: ChunkKind,

    /// Name of the enclosing construct, or the file name
    pub name: String,

    /// Enclosing class, when the chunk is nested inside one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enclosing_class: Option<String>,

    /// Repository-relative path
    pub file: String,

    /// Zero-based line where the chunk begins
    pub start_line: usize,

    /// Zero-based line where the chunk ends (exclusive)
    pub end_line: usize,

    /// Verbatim text of the span
    pub content: String,

    /// Detected language tag
    pub language: String,
}

impl CodeChunk {
    /// Number of lines covered by this chunk
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line
    }

    /// Whether the chunk holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Stable identity of this chunk at the ingestion target
    ///
    /// Format: `{file}#L{start}-{end}`.
    pub fn source_key(&self) -> String {
        format!("{}#L{}-{}", self.file, self.start_line, self.end_line)
    }
}

/// Discovery priority class. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileTier {
    Source,
    Config,
    Documentation,
}

impl FileTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Config => "config",
            Self::Documentation => "documentation",
        }
    }
}

impl fmt::Display for FileTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file selected for indexing by the discoverer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Repository-relative path with `/` separators
    pub path: String,

    /// Absolute path used for reading
    pub absolute_path: PathBuf,

    /// Priority tier
    pub tier: FileTier,

    /// Lowercased extension without the dot
    pub extension: String,
}

/// Whether an expansion has covered the whole candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionStatus {
    Complete,
    InProgress,
}

impl ExpansionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::InProgress => "in_progress",
        }
    }
}

impl fmt::Display for ExpansionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress summary returned by every expansion or seed pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionReport {
    /// Files marked indexed by this batch
    pub files_indexed_this_batch: usize,

    /// Chunks the ingestion target accepted in this batch
    pub chunks_ingested_this_batch: usize,

    /// Chunks whose ingestion failed in this batch
    pub chunks_failed_this_batch: usize,

    /// Files that could not be read or decoded (left for a later batch)
    pub files_failed_this_batch: usize,

    /// Indexed files still present in the candidate set
    pub total_indexed: usize,

    /// Size of the full candidate set
    pub total_files: usize,

    /// floor(100 * total_indexed / total_files)
    pub percentage: u32,

    pub status: ExpansionStatus,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl ExpansionReport {
    /// Whether this call did any work at all
    pub fn is_noop(&self) -> bool {
        self.files_indexed_this_batch == 0
            && self.chunks_ingested_this_batch == 0
            && self.chunks_failed_this_batch == 0
            && self.files_failed_this_batch == 0
    }
}

/// Compute the integer progress percentage
///
/// An empty candidate set counts as fully indexed.
pub fn progress_percentage(indexed: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    ((indexed.min(total) as u64 * 100) / total as u64) as u32
}

/// Result of indexing an explicit list of changed files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    /// Files chunked and pushed to the ingestion target
    pub files_indexed: usize,

    /// Paths rejected by discovery rules, missing, or undecodable
    pub files_skipped: usize,

    pub chunks_ingested: usize,

    pub chunks_failed: usize,
}
