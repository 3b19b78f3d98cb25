// Test helper functions

use async_trait::async_trait;
use kbindex::core::config::Config;
use kbindex::core::ingest::{ChunkPayload, IngestionClient};
use kbindex::core::services::Services;
use kbindex::Result;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Ingestion client that keeps every payload in memory
#[allow(dead_code)] // Used in integration tests
#[derive(Default)]
pub struct RecordingClient {
    payloads: Mutex<Vec<ChunkPayload>>,
}

#[allow(dead_code)] // Used in integration tests
impl RecordingClient {
    pub fn payloads(&self) -> Vec<ChunkPayload> {
        self.payloads.lock().unwrap().clone()
    }

    /// Distinct files that received at least one chunk
    pub fn files(&self) -> BTreeSet<String> {
        self.payloads().into_iter().map(|p| p.file).collect()
    }

    /// Payloads for one file, in line order
    pub fn chunks_for(&self, file: &str) -> Vec<ChunkPayload> {
        let mut chunks: Vec<_> = self
            .payloads()
            .into_iter()
            .filter(|p| p.file == file)
            .collect();
        chunks.sort_by_key(|p| p.metadata.line);
        chunks
    }
}

#[async_trait]
impl IngestionClient for RecordingClient {
    async fn ingest(&self, payload: &ChunkPayload) -> Result<()> {
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// Create services with temporary state storage and a recording client
///
/// The returned `TempDir` owns the state directory; keep it alive for
/// the duration of the test.
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services() -> (Arc<Services>, Arc<RecordingClient>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = Config::default();
    config.storage.state_dir = temp_dir.path().join("projects");

    let client = Arc::new(RecordingClient::default());
    let services = Services::with_client(config, client.clone()).expect("Failed to create services");
    (Arc::new(services), client, temp_dir)
}
