//! Ingestion target abstraction.
//!
//! The pipeline hands every chunk to an [`IngestionClient`]. Delivery
//! is at-least-once: a chunk may be re-sent after a crash, so targets
//! are expected to upsert by [`ChunkPayload::source_key`].

mod http;

pub use http::HttpIngestionClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{ChunkKind, CodeChunk};

/// Metadata attached to each ingested chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(rename = "type")]
    pub kind: ChunkKind,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Zero-based start line
    pub line: usize,
    pub language: String,
}

/// One chunk as delivered to the ingestion target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPayload {
    pub file: String,
    pub content: String,
    pub metadata: ChunkMetadata,
    /// Stable chunk identity, `{file}#L{start}-{end}`
    pub source_key: String,
}

impl ChunkPayload {
    pub fn from_chunk(chunk: &CodeChunk) -> Self {
        Self {
            file: chunk.file.clone(),
            content: chunk.content.clone(),
            metadata: ChunkMetadata {
                kind: chunk.kind,
                name: chunk.name.clone(),
                class: chunk.enclosing_class.clone(),
                line: chunk.start_line,
                language: chunk.language.clone(),
            },
            source_key: chunk.source_key(),
        }
    }

    /// Human-readable document title
    pub fn title(&self) -> String {
        format!(
            "{}:{} {}",
            self.file,
            self.metadata.line + 1,
            self.metadata.name
        )
    }
}

/// Accepts chunks for a knowledge base
#[async_trait]
pub trait IngestionClient: Send + Sync {
    /// Deliver one chunk
    ///
    /// Failures are reported per call; callers decide whether to
    /// continue with sibling chunks.
    async fn ingest(&self, payload: &ChunkPayload) -> Result<()>;
}
