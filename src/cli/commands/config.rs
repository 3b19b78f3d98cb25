//! Show-config command - print the effective configuration

use crate::cli::output::{colors, format_bytes, print_header};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the show-config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also list the per-tier extension tables and skipped directories
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse<'a> {
    pub config_file: String,
    #[serde(flatten)]
    pub config: &'a Config,
    /// The token itself is never printed
    pub api_token_set: bool,
}

/// Execute the show-config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = services.config.as_ref();
    let xdg = XdgDirs::new();

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        config,
        api_token_set: config.ingestion.api_token.is_some(),
    };

    match format {
        OutputFormat::Human => {
            print_header("Configuration:");
            println!("  config_file: {}", colors::file_path(&response.config_file));
            println!(
                "  state_dir: {}",
                colors::file_path(&config.storage.state_dir.display().to_string())
            );

            println!("  discovery:");
            println!(
                "    max_file_size: {}",
                format_bytes(config.discovery.max_file_size_mb as u64 * 1024 * 1024)
            );
            println!("    skip_hidden_dirs: {}", config.discovery.skip_hidden_dirs);
            println!(
                "    exclude_patterns: {:?}",
                config.discovery.exclude_patterns
            );
            if args.all {
                println!("    skip_dirs: {:?}", config.discovery.skip_dirs);
                println!(
                    "    source_extensions: {:?}",
                    config.discovery.source_extensions
                );
                println!(
                    "    config_extensions: {:?}",
                    config.discovery.config_extensions
                );
                println!(
                    "    documentation_extensions: {:?}",
                    config.discovery.documentation_extensions
                );
            }

            println!("  expansion:");
            println!("    batch_size: {}", config.expansion.batch_size);
            println!("    seed_limit: {}", config.expansion.seed_limit);
            println!("    commit_interval: {}", config.expansion.commit_interval);

            println!("  ingestion:");
            println!("    base_url: {}", config.ingestion.base_url);
            println!("    knowledge_base: {}", config.ingestion.knowledge_base);
            println!(
                "    api_token: {}",
                if response.api_token_set {
                    colors::dim("(set)")
                } else {
                    colors::warning("(not set)")
                }
            );
            println!("    timeout_secs: {}", config.ingestion.timeout_secs);
            println!("    max_concurrency: {}", config.ingestion.max_concurrency);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
