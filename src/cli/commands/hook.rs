//! Hook command - post-commit entry point

use crate::cli::commands::unless_locked;
use crate::cli::output::{colors, print_expansion_report};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the hook command
#[derive(Args, Debug)]
pub struct HookArgs {
    /// Project root (the repository top level)
    #[arg(long, short = 'p', default_value = ".")]
    pub project: PathBuf,
}

/// Execute the hook command
pub async fn execute(
    args: HookArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let trigger = services.trigger();
    let Some(report) = unless_locked(trigger.on_commit(&args.project).await)? else {
        return Ok(());
    };

    match format {
        OutputFormat::Human => {
            println!(
                "Commit event {}: {} changed files indexed ({} chunks), {} skipped",
                colors::number(&report.event.to_string()),
                colors::number(&report.changed.files_indexed.to_string()),
                report.changed.chunks_ingested,
                report.changed.files_skipped
            );
            if let Some(expansion) = &report.expansion {
                print_expansion_report("Expansion batch", expansion, format)?;
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
