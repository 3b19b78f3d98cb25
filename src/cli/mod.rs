//! CLI adapter for kbindex
//!
//! Provides the command-line surface over the indexing pipeline in
//! `core/`. The `hook` command is the entry point installed into a
//! repository's `post-commit` hook.
//!
//! # Architecture
//!
//! ```text
//!     +------------------+
//!     |     core/        |
//!     |  (domain logic)  |
//!     +--------+---------+
//!              |
//!              v
//!     +------------------+
//!     |      cli/        |
//!     | (clap adapter)   |
//!     +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

/// kbindex - incremental source indexing for knowledge bases
///
/// Pushes a repository into a knowledge base a batch at a time:
/// the most important files first, the rest on later runs or
/// commits, with progress tracked per project.
#[derive(Parser, Debug)]
#[command(name = "kbindex")]
#[command(version)]
#[command(about = "Incremental source indexing for knowledge bases", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index the highest-priority files of a project for the first time
    Seed(commands::SeedArgs),

    /// Index the next batch of unindexed files
    Expand(commands::ExpandArgs),

    /// Show indexing progress without doing any work
    Status(commands::StatusArgs),

    /// Index specific files immediately
    #[command(name = "index-files")]
    IndexFiles(commands::IndexFilesArgs),

    /// Handle a commit (run from the post-commit hook)
    Hook(commands::HookArgs),

    /// Install the post-commit hook into a git repository
    #[command(name = "install-hook")]
    InstallHook(commands::InstallHookArgs),

    /// Preview how a file would be chunked
    Chunk(commands::ChunkArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  kbindex completions bash > ~/.local/share/bash-completion/completions/kbindex
    ///   zsh:   kbindex completions zsh > ~/.zfunc/_kbindex
    ///   fish:  kbindex completions fish > ~/.config/fish/completions/kbindex.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use std::sync::Arc;

    // Commands that need neither config nor services
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        Commands::Chunk(args) => return commands::chunk::execute(args, cli.format).await,
        Commands::InstallHook(args) => return commands::install_hook::execute(args, cli.format),
        other => other,
    };

    // Initialize XDG directories
    let xdg = XdgDirs::new();
    xdg.ensure_dirs_exist()?;
    xdg.log_paths();

    // Load configuration
    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    // Create services
    let services = Arc::new(Services::new(config)?);

    // Execute command
    match command {
        Commands::Seed(args) => commands::seed::execute(args, &services, cli.format).await,
        Commands::Expand(args) => commands::expand::execute(args, &services, cli.format).await,
        Commands::Status(args) => commands::status::execute(args, &services, cli.format).await,
        Commands::IndexFiles(args) => {
            commands::index_files::execute(args, &services, cli.format).await
        }
        Commands::Hook(args) => commands::hook::execute(args, &services, cli.format).await,
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) | Commands::Chunk(_) | Commands::InstallHook(_) => {
            unreachable!("handled before services are created")
        }
    }
}
