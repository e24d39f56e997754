use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gst")]
#[command(about = "Async git working-copy operations and a non-destructive conflict probe")]
pub struct Cli {
    /// Repository to operate on
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Give up on read-only commands after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Show porcelain status
    Status,
    /// Show the commit graph
    Log {
        #[arg(long, default_value_t = 20)]
        max_count: u32,
        branch: Option<String>,
    },
    /// List branches
    Branches,
    /// List tags
    Tags,
    /// List remotes
    Remotes,
    /// Show one config value, or all of them
    Config { key: Option<String> },
    /// Report files that would conflict if SOURCE were merged into the current branch
    Probe {
        source: String,
        /// Branch expected to be checked out; defaults to the current branch
        #[arg(long)]
        target: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
