//! Incremental indexing module.
//!
//! Discovers repository files, splits them into logical chunks,
//! and schedules their delivery to the ingestion target in
//! priority-ordered batches. Key pieces:
//!
//! - Tiered file discovery (source, configuration, documentation)
//! - Declaration-boundary chunking with per-family marker scanners
//! - Batch expansion with persisted progress
//! - Post-commit trigger for changed files

pub mod chunker;
pub mod language;
pub mod pipeline;
pub mod scanner;
pub mod trigger;
pub mod walker;

pub use chunker::Chunker;
pub use language::{Language, LanguageFamily};
pub use pipeline::{select_batch, ExpansionScheduler};
pub use scanner::{Marker, MarkerKind, MarkerScanner};
pub use trigger::{changed_files, install_hook, CommitTrigger, TriggerReport};
pub use walker::{DiscoveryRules, FileDiscoverer};
