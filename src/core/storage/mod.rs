//! Storage layer for per-project index state.
//!
//! # Layout
//!
//! ```text
//! {state_dir}/
//! ├── {project-key-1}/
//! │   ├── index_state.json    # Indexed paths and counters
//! │   └── .lock               # Advisory writer lock
//! ```

mod lock;
mod state;

pub use lock::ProjectLock;
pub use state::{project_key, IndexState, IndexStateStore, SCHEMA_VERSION};
