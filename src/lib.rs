//! kbindex - Incremental Source Indexing for Knowledge Bases
//!
//! Pushes a source repository into a knowledge base without indexing
//! all of it up front. A seed pass sends the highest-priority files,
//! later expansion batches send the rest, and a post-commit hook keeps
//! recently changed files fresh.
//!
//! # Architecture
//!
//! The codebase is organized into two modules:
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - indexer (discovery, chunking, batch expansion, commit trigger)
//!   - ingest (knowledge-base client)
//!   - storage (per-project state and locking)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - Tiered discovery: source before configuration before documentation
//! - Declaration-boundary chunking for keyword and brace languages
//! - Resumable batches with an atomically written progress file
//! - One indexing run per project at a time

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{IndexerError, Result};
pub use core::services::Services;
pub use core::types::*;
