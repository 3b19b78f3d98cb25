//! Unified service container for kbindex
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::indexer::{CommitTrigger, ExpansionScheduler};
use crate::core::ingest::{HttpIngestionClient, IngestionClient};
use std::sync::Arc;

/// Unified services container
///
/// CLI commands use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Ingestion target shared by every indexing path
    pub client: Arc<dyn IngestionClient>,

    /// Expansion scheduler built from the discovery and storage config
    pub scheduler: Arc<ExpansionScheduler>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration, posting to the configured HTTP target
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(HttpIngestionClient::new(&config.ingestion)?);
        Self::with_client(config, client)
    }

    /// Create services with a caller-supplied ingestion client
    pub fn with_client(config: Config, client: Arc<dyn IngestionClient>) -> Result<Self> {
        let scheduler = Arc::new(ExpansionScheduler::from_config(
            &config,
            Arc::clone(&client),
        )?);

        Ok(Self {
            client,
            scheduler,
            config: Arc::new(config),
        })
    }

    /// Commit trigger using the configured batch size and cadence
    pub fn trigger(&self) -> CommitTrigger {
        CommitTrigger::new(
            Arc::clone(&self.scheduler),
            self.config.expansion.batch_size,
            self.config.expansion.commit_interval,
        )
    }
}
