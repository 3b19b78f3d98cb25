//! Seed command - initial indexing pass over a project

use crate::cli::commands::unless_locked;
use crate::cli::output::{colors, print_expansion_report};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the seed command
#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Project root to index
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Number of highest-priority files to index (defaults to expansion.seed_limit)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Discard existing progress and seed again
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Execute the seed command
pub async fn execute(
    args: SeedArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let limit = args.limit.unwrap_or(services.config.expansion.seed_limit);
    if limit == 0 {
        return Err("Seed limit must be greater than 0.".into());
    }

    if format == OutputFormat::Human {
        eprintln!(
            "Seeding {} with up to {} files...",
            colors::file_path(&args.path.display().to_string()),
            colors::number(&limit.to_string())
        );
    }

    let Some(report) =
        unless_locked(services.scheduler.seed(&args.path, limit, args.force).await)?
    else {
        return Ok(());
    };

    let heading = if report.is_noop() && !args.force {
        "Already seeded (use --force to start over)"
    } else {
        "Seed complete"
    };
    print_expansion_report(heading, &report, format)?;

    Ok(())
}
