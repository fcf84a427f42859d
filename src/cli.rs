//! Command-line interface for mp3snip
//!
//! Provides argument parsing using clap derive macros.

use crate::config::ReportFormat;
use crate::trim::PredictionPolicy;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

/// Trim the start and end of MP3 files without re-encoding
#[derive(Parser, Debug)]
#[command(
    name = "mp3snip",
    version = crate::version_string(),
    about = "Trim the start and end of MP3 files without re-encoding"
)]
pub struct Cli {
    /// Subcommand to execute (default: trim)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: trim state changes, -vv: every tag and resync)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Cut everything before this point. Examples: 25s, 500ms, 1m30s
    #[arg(long, value_name = "DURATION")]
    pub start: Option<String>,

    /// Cut this much from the end (optional). Examples: 10s, 200ms
    #[arg(long, value_name = "DURATION")]
    pub end: Option<String>,

    /// Path to input mp3 file
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Path to output mp3 file
    #[arg(long = "out", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// How the total frame count is estimated for --end
    #[arg(long, value_name = "POLICY")]
    pub prediction: Option<PredictionPolicy>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Run the trim without writing an output file
    #[arg(long)]
    pub dry_run: bool,

    /// Keep the partially written output if the run fails
    #[arg(long)]
    pub keep_partial: bool,
}

impl Cli {
    /// Report format after applying `--json` over the configured one.
    pub fn report_format(&self, configured: ReportFormat) -> ReportFormat {
        if self.json {
            ReportFormat::Json
        } else {
            configured
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,
}

/// Parse a trim duration.
///
/// Supports any duration format accepted by `humantime`: bare numbers
/// (seconds), single-unit (`25s`, `500ms`, `2m`), and compound (`1m30s`).
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    if let Ok(secs) = s.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).map_err(|e| e.to_string());
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}
