//! Install-hook command - wire kbindex into a repository's post-commit hook

use crate::cli::output::{colors, print_success};
use crate::cli::OutputFormat;
use crate::core::indexer::install_hook;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the install-hook command
#[derive(Args, Debug)]
pub struct InstallHookArgs {
    /// Repository root
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Serialize)]
struct InstallHookResponse {
    hook: String,
}

/// Execute the install-hook command
pub fn execute(
    args: InstallHookArgs,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let hook = install_hook(&args.path)?;

    match format {
        OutputFormat::Human => {
            print_success("Installed post-commit hook");
            println!("  {}", colors::file_path(&hook.display().to_string()));
        }
        OutputFormat::Json => {
            let response = InstallHookResponse {
                hook: hook.to_string_lossy().into_owned(),
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
