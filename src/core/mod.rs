//! Core domain logic (transport-agnostic)
//!
//! This module contains the indexing pipeline and everything it
//! depends on, independent of the command-line surface.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **storage**: Per-project index state and locking
//! - **ingest**: Ingestion client trait and HTTP implementation
//! - **indexer**: Discovery, chunking, scheduling, commit trigger
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod indexer;
pub mod ingest;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{IndexerError, Result};
pub use services::Services;
