//! Status command - report indexing progress

use crate::cli::output::{colors, format_relative_time, print_expansion_report};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Project root
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// Execute the status command
pub async fn execute(
    args: StatusArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = services.scheduler.status(&args.path)?;
    print_expansion_report("Index status", &report, format)?;

    if format == OutputFormat::Human {
        let store = services.scheduler.store(&args.path)?;
        let state = store.load();
        println!(
            "  State: {}",
            colors::file_path(&store.state_path().display().to_string())
        );
        if store.state_path().exists() {
            println!(
                "  Last updated: {} ({} commit events)",
                colors::dim(&format_relative_time(&state.last_updated_at)),
                state.trigger_events
            );
        }
    }

    Ok(())
}
