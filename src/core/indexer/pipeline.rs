//! Incremental expansion scheduling.
//!
//! Coordinates one indexing pass over a project:
//! 1. Take the project lock
//! 2. Discover the full candidate set
//! 3. Diff it against the persisted indexed set
//! 4. Chunk and ingest the next batch of unindexed files
//! 5. Persist the union and report progress
//!
//! State is only written after a whole batch has been attempted, so an
//! interrupted batch is reconsidered in full on the next call.

use futures::stream::{self, StreamExt};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::core::config::Config;
use crate::core::error::{IndexerError, Result};
use crate::core::indexer::walker::{DiscoveryRules, FileDiscoverer};
use crate::core::indexer::Chunker;
use crate::core::ingest::{ChunkPayload, IngestionClient};
use crate::core::storage::{IndexState, IndexStateStore};
use crate::core::types::{
    progress_percentage, ChangeReport, ExpansionReport, ExpansionStatus, FileCandidate,
};

/// Pick the next files to index
///
/// Walks `full` in its priority order, skipping paths already in
/// `indexed`, and returns at most `limit` candidates. Shared by the
/// seed pass and every expansion.
pub fn select_batch<'a>(
    full: &'a [FileCandidate],
    indexed: &BTreeSet<String>,
    limit: usize,
) -> Vec<&'a FileCandidate> {
    full.iter()
        .filter(|candidate| !indexed.contains(&candidate.path))
        .take(limit)
        .collect()
}

/// Chunk counts for one processed file
#[derive(Debug, Clone, Copy, Default)]
struct FileOutcome {
    ingested: usize,
    failed: usize,
}

/// Drives incremental indexing for projects
pub struct ExpansionScheduler {
    discoverer: FileDiscoverer,
    chunker: Chunker,
    client: Arc<dyn IngestionClient>,
    state_root: PathBuf,
    max_concurrency: usize,
}

impl ExpansionScheduler {
    pub fn new(
        discoverer: FileDiscoverer,
        client: Arc<dyn IngestionClient>,
        state_root: PathBuf,
        max_concurrency: usize,
    ) -> Self {
        Self {
            discoverer,
            chunker: Chunker::new(),
            client,
            state_root,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Build a scheduler from configuration
    pub fn from_config(config: &Config, client: Arc<dyn IngestionClient>) -> Result<Self> {
        let rules = DiscoveryRules::from_config(&config.discovery)?;
        Ok(Self::new(
            FileDiscoverer::new(rules),
            client,
            config.storage.state_dir.clone(),
            config.ingestion.max_concurrency,
        ))
    }

    /// State store for a project
    pub fn store(&self, project_root: &Path) -> Result<IndexStateStore> {
        IndexStateStore::new(&self.state_root, project_root)
    }

    /// Index the next `batch_size` unindexed files
    ///
    /// # Errors
    ///
    /// Fails on an invalid project root, lock contention, or an
    /// unwritable state file. Per-file and per-chunk failures are
    /// counted in the report instead.
    pub async fn expand(&self, project_root: &Path, batch_size: usize) -> Result<ExpansionReport> {
        if batch_size == 0 {
            return Err(IndexerError::ConfigError(
                "batch_size must be greater than 0".to_string(),
            ));
        }

        let start = Instant::now();
        let store = self.store(project_root)?;
        let _lock = store.lock()?;

        let full = self.discoverer.discover(store.project_root())?;
        let state = store.load();

        self.run_batch(&store, state, &full, batch_size, start).await
    }

    /// Initial pass over the `limit` highest-priority files
    ///
    /// A project that already has indexed files is left untouched
    /// unless `force` is set, in which case its state is reset first.
    pub async fn seed(&self, project_root: &Path, limit: usize, force: bool) -> Result<ExpansionReport> {
        let start = Instant::now();
        let store = self.store(project_root)?;
        let _lock = store.lock()?;

        if force {
            store.reset()?;
        }

        let full = self.discoverer.discover(store.project_root())?;
        let state = store.load();

        if !state.indexed_files.is_empty() {
            tracing::info!(
                "Project {:?} already seeded ({} files); use force to re-seed",
                store.project_root(),
                state.indexed_files.len()
            );
            return Ok(progress_report(&state, &full, start));
        }

        self.run_batch(&store, state, &full, limit, start).await
    }

    /// Current progress without indexing anything
    pub fn status(&self, project_root: &Path) -> Result<ExpansionReport> {
        let start = Instant::now();
        let store = self.store(project_root)?;
        let full = self.discoverer.discover(store.project_root())?;
        let state = store.load();

        Ok(progress_report(&state, &full, start))
    }

    /// Index an explicit list of changed files
    ///
    /// Paths may be absolute or relative to the project root. Each one
    /// is filtered through the discovery rules; missing or excluded
    /// paths are skipped. Persisted state is not touched.
    pub async fn index_paths(&self, project_root: &Path, paths: &[PathBuf]) -> Result<ChangeReport> {
        let root = project_root.canonicalize().map_err(|e| {
            IndexerError::InvalidPath(format!("{}: {e}", project_root.display()))
        })?;

        let mut report = ChangeReport::default();
        let mut seen = HashSet::new();

        for path in paths {
            let path = if path.is_absolute() {
                path.canonicalize().unwrap_or_else(|_| path.clone())
            } else {
                path.clone()
            };

            let Some(candidate) = self.discoverer.candidate(&root, &path) else {
                tracing::debug!("Skipping changed path {:?}", path);
                report.files_skipped += 1;
                continue;
            };
            if !seen.insert(candidate.path.clone()) {
                continue;
            }

            match self.process_file(&candidate).await {
                Ok(outcome) => {
                    report.files_indexed += 1;
                    report.chunks_ingested += outcome.ingested;
                    report.chunks_failed += outcome.failed;
                }
                Err(e) => {
                    tracing::warn!("Failed to index {}: {}", candidate.path, e);
                    report.files_skipped += 1;
                }
            }
        }

        tracing::info!(
            "Changed files: {} indexed, {} skipped, {} chunks ingested, {} failed",
            report.files_indexed,
            report.files_skipped,
            report.chunks_ingested,
            report.chunks_failed
        );

        Ok(report)
    }

    async fn run_batch(
        &self,
        store: &IndexStateStore,
        mut state: IndexState,
        full: &[FileCandidate],
        limit: usize,
        start: Instant,
    ) -> Result<ExpansionReport> {
        let present: HashSet<&str> = full.iter().map(|c| c.path.as_str()).collect();
        let pruned = state.retain_present(&present);
        if pruned > 0 {
            tracing::info!("Dropped {} indexed files no longer present", pruned);
        }

        let batch = select_batch(full, &state.indexed_files, limit);
        tracing::info!(
            "Expanding {:?}: {} of {} files remaining, batch of {}",
            store.project_root(),
            full.len() - state.indexed_files.len(),
            full.len(),
            batch.len()
        );

        let mut files_indexed = 0;
        let mut files_failed = 0;
        let mut chunks_ingested = 0;
        let mut chunks_failed = 0;
        let mut newly_indexed = Vec::with_capacity(batch.len());

        for candidate in batch {
            match self.process_file(candidate).await {
                Ok(outcome) => {
                    tracing::debug!(
                        "Indexed {} ({} chunks, {} failed)",
                        candidate.path,
                        outcome.ingested,
                        outcome.failed
                    );
                    files_indexed += 1;
                    chunks_ingested += outcome.ingested;
                    chunks_failed += outcome.failed;
                    newly_indexed.push(candidate.path.clone());
                }
                Err(e) => {
                    tracing::warn!("Failed to process {}: {}", candidate.path, e);
                    files_failed += 1;
                }
            }
        }

        state.indexed_files.extend(newly_indexed);
        state.total_files = full.len();
        state.touch();
        store.save(&state)?;

        let mut report = progress_report(&state, full, start);
        report.files_indexed_this_batch = files_indexed;
        report.files_failed_this_batch = files_failed;
        report.chunks_ingested_this_batch = chunks_ingested;
        report.chunks_failed_this_batch = chunks_failed;

        tracing::info!(
            "Batch complete: {} files indexed, {} failed, {} chunks ingested, \
             {} chunks failed; {}/{} ({}%) in {}ms",
            files_indexed,
            files_failed,
            chunks_ingested,
            chunks_failed,
            report.total_indexed,
            report.total_files,
            report.percentage,
            report.duration_ms
        );

        Ok(report)
    }

    /// Read, chunk, and ingest one file
    ///
    /// Read and decode errors are returned; chunk ingestion failures
    /// are only counted.
    async fn process_file(&self, candidate: &FileCandidate) -> Result<FileOutcome> {
        let bytes = tokio::fs::read(&candidate.absolute_path).await?;
        let chunks = self.chunker.chunk_bytes(&bytes, &candidate.path)?;

        let payloads: Vec<ChunkPayload> = chunks
            .iter()
            .filter(|chunk| !chunk.is_blank())
            .map(ChunkPayload::from_chunk)
            .collect();

        let results: Vec<(String, Result<()>)> = stream::iter(payloads.into_iter().map(|payload| {
            let client = Arc::clone(&self.client);
            async move {
                let result = client.ingest(&payload).await;
                (payload.source_key, result)
            }
        }))
        .buffer_unordered(self.max_concurrency)
        .collect()
        .await;

        let mut outcome = FileOutcome::default();
        for (source_key, result) in results {
            match result {
                Ok(()) => outcome.ingested += 1,
                Err(e) if e.is_ingestion() => {
                    tracing::warn!("Ingestion failed for {}: {}", source_key, e);
                    outcome.failed += 1;
                }
                Err(e) => {
                    // Not a target failure; still a failed chunk, never a failed file
                    tracing::error!("Ingestion client error for {}: {}", source_key, e);
                    outcome.failed += 1;
                }
            }
        }

        Ok(outcome)
    }
}

/// Progress of `state` against the candidate set, with no batch work
fn progress_report(state: &IndexState, full: &[FileCandidate], start: Instant) -> ExpansionReport {
    let total_indexed = full.iter().filter(|c| state.is_indexed(&c.path)).count();
    let total_files = full.len();
    let status = if total_indexed >= total_files {
        ExpansionStatus::Complete
    } else {
        ExpansionStatus::InProgress
    };

    ExpansionReport {
        files_indexed_this_batch: 0,
        chunks_ingested_this_batch: 0,
        chunks_failed_this_batch: 0,
        files_failed_this_batch: 0,
        total_indexed,
        total_files,
        percentage: progress_percentage(total_indexed, total_files),
        status,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}
