use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scrublens")]
#[command(about = "Sanitize captured HTTP traffic and submit it for AI security analysis")]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "scrublens.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sanitize a captured exchange and submit it for analysis
    Analyze {
        /// File containing the raw HTTP request text
        #[arg(long)]
        request: PathBuf,
        /// File containing the raw HTTP response text
        #[arg(long)]
        response: PathBuf,
        /// Analysis mode (vulnerability-scan, security-headers-check, custom-prompt)
        #[arg(long)]
        mode: Option<String>,
        /// Print the sanitized prompt instead of calling the API
        #[arg(long)]
        dry_run: bool,
    },
    /// Sanitize a single message and print the result with its audit notes
    Sanitize {
        /// File containing the raw HTTP message text
        file: PathBuf,
        /// Analysis mode (selects the header-handling policy)
        #[arg(long)]
        mode: Option<String>,
    },
    /// View past analysis results
    History {
        /// Show last N entries
        #[arg(long, default_value = "20")]
        tail: usize,
        /// Export all records
        #[arg(long)]
        export: bool,
        /// Export format (json or csv)
        #[arg(long, default_value = "json")]
        format: String,
    },
    /// Initialize ScrubLens configuration
    Init,
}
