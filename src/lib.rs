//! dupefinder - duplicate file finder
//!
//! Finds files with identical content below a directory. Files are first
//! partitioned by size; only files sharing a size are hashed with SHA-256,
//! and files with equal digests are reported as duplicates.
//!
//! The binary is a thin wrapper around [`run_app`].

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::{IsTerminal, Write};
use std::sync::Arc;

use anyhow::Context;

use crate::cli::{Cli, Commands, OutputFormat, ScanArgs};
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::output::{JsonOutput, ReportStyle, TextReport};
use crate::progress::Progress;

/// Run the application for parsed command-line arguments.
///
/// Writes the report to stdout and status messages to stderr.
///
/// # Errors
///
/// Returns an error if the scan root is invalid, traversal fails, the scan
/// is interrupted or the report cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Scan(ref args) => run_scan(&cli, args),
    }
}

fn run_scan(cli: &Cli, args: &ScanArgs) -> anyhow::Result<ExitCode> {
    let handler = signal::install_handler();
    // Status lines would corrupt machine-readable stdout/stderr.
    let show_status = !cli.quiet && !cli.json_errors && args.output == OutputFormat::Text;

    let progress = Arc::new(Progress::new(cli.quiet));
    let mut config = FinderConfig::default()
        .with_strict(args.strict)
        .with_shutdown_flag(handler.flag())
        .with_progress_callback(progress);
    if let Some(threads) = args.io_threads {
        config = config.with_io_threads(usize::try_from(threads).unwrap_or(usize::MAX));
    }
    log::debug!("Finder configuration: {:?}", config);
    let finder = DuplicateFinder::new(config);

    if show_status {
        eprintln!("Counting files in {} ...", args.path.display());
    }
    let (files, scan_errors) = finder.enumerate(&args.path)?;

    if show_status && !files.is_empty() {
        eprintln!("Processing {} files ...", files.len());
    }
    let (groups, mut summary) = finder.detect(files)?;
    summary.scan_errors = scan_errors;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.output {
        OutputFormat::Text => {
            let color = !cli.no_color && stdout.is_terminal();
            TextReport::new(&groups, &summary, ReportStyle::for_terminal(color))
                .write_to(&mut out)
                .context("Failed to write report")?;
        }
        OutputFormat::Json => {
            JsonOutput::new(&groups, &summary)
                .write_to(&mut out)
                .context("Failed to write JSON report")?;
        }
    }
    out.flush().context("Failed to flush stdout")?;

    Ok(ExitCode::Success)
}
