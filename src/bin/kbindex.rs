//! kbindex CLI - incremental source indexing for knowledge bases
//!
//! # Examples
//!
//! ```bash
//! # Index the 100 most important files of a project
//! kbindex seed /path/to/repo
//!
//! # Index the next batch
//! kbindex expand /path/to/repo
//!
//! # Keep the index fresh on every commit
//! kbindex install-hook /path/to/repo
//!
//! # Check progress
//! kbindex status /path/to/repo
//! ```

use clap::Parser;
use kbindex::cli::{output, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kbindex=info".into());

    // Logs go to stderr so stdout stays parseable with --format json
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
