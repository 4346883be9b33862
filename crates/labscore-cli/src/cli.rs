//! CLI argument definitions for labscore.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use labscore_core::ExportFormat;
use labscore_core::config::defaults;

#[derive(Parser)]
#[command(name = "labscore")]
#[command(about = "Lab score summary for a course repository", version)]
pub struct Args {
    /// Load settings from a TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Repository holding the logs (owner/name)
    #[arg(long, env = "LABSCORE_REPO")]
    pub repo: Option<String>,

    /// Branch to read from and commit to (repository default if omitted)
    #[arg(long)]
    pub branch: Option<String>,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Use a local directory instead of GitHub (takes precedence over --repo)
    #[arg(long, value_name = "DIR")]
    pub local: Option<PathBuf>,

    /// Fail on log lines with an invalid lab, date or score instead of skipping them
    #[arg(long)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the summary and commit it (default)
    Publish {
        /// Commit message
        #[arg(short, long, default_value = defaults::COMMIT_MESSAGE)]
        message: String,
        /// Print the document instead of committing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Build the group tables without committing anything
    Render {
        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,
    },
    /// Show the best score per lab of a single log file
    Parse {
        /// Log file path
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Html,
    Tsv,
    Json,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Html => ExportFormat::Html,
            OutputFormat::Tsv => ExportFormat::Tsv,
            OutputFormat::Json => ExportFormat::Json,
        }
    }
}
