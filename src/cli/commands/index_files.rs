//! Index-files command - index specific files immediately

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the index-files command
#[derive(Args, Debug)]
pub struct IndexFilesArgs {
    /// Files to index (absolute, or relative to the project root)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Project root the files belong to
    #[arg(long, short = 'p', default_value = ".")]
    pub project: PathBuf,
}

/// Execute the index-files command
pub async fn execute(
    args: IndexFilesArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = services
        .scheduler
        .index_paths(&args.project, &args.files)
        .await?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} files ({} chunks ingested, {} failed), {} skipped",
                colors::success("Indexed"),
                colors::number(&report.files_indexed.to_string()),
                colors::number(&report.chunks_ingested.to_string()),
                report.chunks_failed,
                report.files_skipped
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
