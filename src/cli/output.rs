//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! or JSON formats. Supports colored output (respects NO_COLOR env var).

use crate::cli::OutputFormat;
use crate::core::types::{ExpansionReport, ExpansionStatus};

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for file paths
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Style for chunk kinds
    pub fn kind(s: &str) -> ColoredString {
        s.magenta()
    }
}

/// Format bytes into human-readable size
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Format relative time (e.g., "2h ago", "3d ago")
pub fn format_relative_time(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(*timestamp);

    if duration.num_seconds() < 0 {
        return "in the future".to_string();
    }

    let mins = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();

    if days > 0 {
        format!("{days}d ago")
    } else if hours > 0 {
        format!("{hours}h ago")
    } else if mins > 0 {
        format!("{mins}m ago")
    } else {
        "just now".to_string()
    }
}

/// Fixed-width text progress bar, e.g. `[########------------]`
pub fn progress_bar(percentage: u32, width: usize) -> String {
    let filled = (percentage.min(100) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Print an expansion report in the requested format
pub fn print_expansion_report(
    heading: &str,
    report: &ExpansionReport,
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Human => {
            print_header(heading);
            if !report.is_noop() {
                println!(
                    "  Batch: {} files indexed, {} chunks ingested",
                    colors::number(&report.files_indexed_this_batch.to_string()),
                    colors::number(&report.chunks_ingested_this_batch.to_string())
                );
                if report.chunks_failed_this_batch > 0 || report.files_failed_this_batch > 0 {
                    println!(
                        "  {}: {} chunks, {} files",
                        colors::warning("Failed"),
                        report.chunks_failed_this_batch,
                        report.files_failed_this_batch
                    );
                }
            }
            println!(
                "  Progress: {} {}/{} files ({}%)",
                progress_bar(report.percentage, 20),
                colors::number(&report.total_indexed.to_string()),
                colors::number(&report.total_files.to_string()),
                report.percentage
            );
            let status = match report.status {
                ExpansionStatus::Complete => colors::success(report.status.as_str()),
                ExpansionStatus::InProgress => colors::warning(report.status.as_str()),
            };
            println!(
                "  Status: {} {}",
                status,
                colors::dim(&format!(
                    "({})",
                    format_duration(report.duration_ms as f64 / 1000.0)
                ))
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}
