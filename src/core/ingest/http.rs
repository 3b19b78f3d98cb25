//! HTTP ingestion client for a knowledge-base documents API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::{ChunkMetadata, ChunkPayload, IngestionClient};
use crate::core::config::IngestionConfig;
use crate::core::error::{IndexerError, Result};

/// Posts chunks to `{base_url}/knowledge-bases/{knowledge_base}/documents`
#[derive(Debug, Clone)]
pub struct HttpIngestionClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct DocumentRequest<'a> {
    title: String,
    content: &'a str,
    source_key: &'a str,
    metadata: &'a ChunkMetadata,
}

impl HttpIngestionClient {
    /// Build a client from the `[ingestion]` config section
    pub fn new(config: &IngestionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| IndexerError::ConfigError(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/knowledge-bases/{}/documents",
                config.base_url.trim_end_matches('/'),
                config.knowledge_base
            ),
            api_token: config.api_token.clone().filter(|t| !t.is_empty()),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IngestionClient for HttpIngestionClient {
    async fn ingest(&self, payload: &ChunkPayload) -> Result<()> {
        let body = DocumentRequest {
            title: payload.title(),
            content: &payload.content,
            source_key: &payload.source_key,
            metadata: &payload.metadata,
        };

        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                IndexerError::IngestionTimeout(self.timeout_secs)
            } else {
                IndexerError::from(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(IndexerError::IngestionFailed(format!(
                "{} returned {}: {}",
                payload.source_key,
                status.as_u16(),
                error_text.trim()
            )));
        }

        Ok(())
    }
}
