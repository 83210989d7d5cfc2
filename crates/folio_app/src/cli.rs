use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::logging::LogDestination;

/// List the blog posts kept as markdown files in a GitHub repository.
#[derive(Debug, Parser)]
#[command(name = "folio", version)]
pub struct Cli {
    /// RON file with feed settings; flags override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Account that owns the repository.
    #[arg(long)]
    pub account: Option<String>,

    /// Repository holding the posts.
    #[arg(long)]
    pub repository: Option<String>,

    /// Branch to read from.
    #[arg(long)]
    pub branch: Option<String>,

    /// Directory of the repository containing the posts.
    #[arg(long = "path")]
    pub subdirectory: Option<String>,

    /// Maximum number of post cards to print.
    #[arg(long)]
    pub limit: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log: LogDestination,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
