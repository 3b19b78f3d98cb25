//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a specific CLI command.

pub mod chunk;
pub mod completions;
pub mod config;
pub mod expand;
pub mod hook;
pub mod index_files;
pub mod install_hook;
pub mod seed;
pub mod status;

// Re-export argument types for use in mod.rs
pub use chunk::ChunkArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use expand::ExpandArgs;
pub use hook::HookArgs;
pub use index_files::IndexFilesArgs;
pub use install_hook::InstallHookArgs;
pub use seed::SeedArgs;
pub use status::StatusArgs;

use crate::cli::output;

/// Report lock contention as a warning instead of a failure
///
/// Another indexing run owning the project is an expected condition
/// for hook-driven invocations.
pub(crate) fn unless_locked<T>(
    result: crate::core::Result<T>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_locked() => {
            output::print_warning(&format!("{e}; skipping"));
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
