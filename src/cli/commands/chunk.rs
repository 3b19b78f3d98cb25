//! Chunk command - preview how a file is split into chunks

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::indexer::Chunker;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the chunk command
#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// File to chunk
    pub file: PathBuf,

    /// Print each chunk's content
    #[arg(long, short = 'c')]
    pub content: bool,
}

/// Execute the chunk command
pub async fn execute(args: ChunkArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = tokio::fs::read(&args.file).await.map_err(|e| {
        format!("Cannot read '{}': {e}", args.file.display())
    })?;
    let label = args.file.to_string_lossy().replace('\\', "/");
    let chunks = Chunker::new().chunk_bytes(&bytes, &label)?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} chunks in {}",
                colors::number(&chunks.len().to_string()),
                colors::file_path(&label)
            );
            for chunk in &chunks {
                let class = chunk
                    .enclosing_class
                    .as_deref()
                    .map(|c| format!(" in {c}"))
                    .unwrap_or_default();
                println!(
                    "  L{}-{} {} {}{}",
                    chunk.start_line + 1,
                    chunk.end_line,
                    colors::kind(chunk.kind.as_str()),
                    colors::label(&chunk.name),
                    colors::dim(&class)
                );
                if args.content {
                    for line in chunk.content.lines() {
                        println!("    {}", colors::dim(line));
                    }
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        }
    }

    Ok(())
}
