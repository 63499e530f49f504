//! Command-line interface definitions for dupefinder.
//!
//! The CLI follows standard conventions with global options (verbosity,
//! color, error format) and a `scan` subcommand.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory and print the report
//! dupefinder scan ~/Downloads
//!
//! # JSON output for scripting
//! dupefinder scan ~/Downloads --output json
//!
//! # Abort on the first unreadable subdirectory
//! dupefinder scan ~/Downloads --strict
//!
//! # Verbose mode for debugging
//! dupefinder -vv scan ~/Downloads
//! ```

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::error::ExitCode;

/// Find duplicate files by size and SHA-256 content hash.
#[derive(Debug, Parser)]
#[command(name = "dupefinder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output and all logging except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (any non-empty NO_COLOR value counts)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory for duplicate files
    Scan(ScanArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Directory to scan for duplicates
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Number of threads used for hashing (default: number of CPUs)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub io_threads: Option<u64>,

    /// Abort when a subdirectory cannot be read instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Exit code for a clap parse outcome.
///
/// Help and version requests succeed; every other parse failure
/// (unknown command, missing directory, bad value) is a failure.
#[must_use]
pub fn parse_exit_code(err: &clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
        _ => ExitCode::Failure,
    }
}

/// Whether the parse error should be followed by the full help text.
#[must_use]
pub fn wants_help_text(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::InvalidSubcommand
            | ErrorKind::UnknownArgument
            | ErrorKind::MissingSubcommand
            | ErrorKind::MissingRequiredArgument
    )
}

/// Render the top-level help text.
#[must_use]
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}
