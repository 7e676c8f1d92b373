//! plan-check CLI tool.
//!
//! Usage:
//! ```bash
//! plan-check check plan.dwg --rooms raumliste.xlsx
//! plan-check check plans/ --format json
//! plan-check rules
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Validates floor-plan drawings against the BBL CAD-Richtlinie
#[derive(Parser)]
#[command(name = "plan-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a rule-set TOML file overriding the built-in guideline
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a drawing or a directory of drawings
    Check {
        /// Drawing file, or directory searched recursively for *.dwg
        path: PathBuf,

        /// Room table (XLSX) to cross-reference AOIDs against
        #[arg(short, long)]
        rooms: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// dwgread binary used for DWG decoding
        #[arg(long, default_value = "dwgread", env = "PLAN_CHECK_DWGREAD")]
        dwgread: PathBuf,

        /// Converter timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },

    /// List the built-in checkers and their finding codes
    Rules,
}

/// Output format for validation results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON report.
    Json,
    /// One-line-per-finding compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check {
            path,
            rooms,
            format,
            dwgread,
            timeout,
        } => commands::check::run(
            &path,
            rooms.as_deref(),
            format,
            &dwgread,
            timeout,
            cli.config.as_deref(),
        ),
        Commands::Rules => {
            commands::rules::run();
            Ok(())
        }
    }
}
