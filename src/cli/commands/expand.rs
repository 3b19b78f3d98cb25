//! Expand command - index the next batch of unindexed files

use crate::cli::commands::unless_locked;
use crate::cli::output::print_expansion_report;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::ExpansionStatus;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the expand command
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Project root to index
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Files per batch (defaults to expansion.batch_size)
    #[arg(long, short = 'b')]
    pub batch_size: Option<usize>,

    /// Keep running batches until the project is fully indexed
    #[arg(long)]
    pub all: bool,
}

/// Execute the expand command
pub async fn execute(
    args: ExpandArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let batch_size = args
        .batch_size
        .unwrap_or(services.config.expansion.batch_size);
    if batch_size == 0 {
        return Err("Batch size must be greater than 0.".into());
    }

    loop {
        let Some(report) =
            unless_locked(services.scheduler.expand(&args.path, batch_size).await)?
        else {
            return Ok(());
        };

        print_expansion_report("Expansion batch", &report, format)?;

        // Stop when finished, or when a batch made no headway (only unreadable files left)
        let stalled = report.files_indexed_this_batch == 0;
        if !args.all || report.status == ExpansionStatus::Complete || stalled {
            return Ok(());
        }
    }
}
