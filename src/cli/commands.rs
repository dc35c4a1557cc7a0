//! Command implementations for the bfbs CLI
//!
//! This module contains the main command execution logic, progress reporting,
//! and per-file error handling for the CLI interface.

use crate::app::services::report::{FileFailure, RunSummary, create_report_writer};
use crate::cli::args::Args;
use crate::cli::input::resolve_inputs;
use crate::constants::{PROGRAM_NAME, PROGRAM_VERSION};
use crate::{CsvStatsReader, Error, Result};
use anyhow::{Context, bail};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Main command runner for bfbs
///
/// This function orchestrates the entire workflow:
/// 1. Set up logging and validate arguments
/// 2. Open the report destination
/// 3. Process every input file, reporting each as it finishes
/// 4. Write the run summary
pub fn run(args: Args) -> anyhow::Result<RunSummary> {
    setup_logging(&args)?;

    info!("Starting {} {}", PROGRAM_NAME, PROGRAM_VERSION);
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let out: Box<dyn Write> = match &args.output_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create report file {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    execute(&args, out)
}

/// Process every input and stream results into `out`
///
/// Files are processed one at a time, in argument order. A file that fails
/// is reported and counted; the run continues unless `--fail-fast` is set.
pub fn execute<'a>(args: &Args, out: Box<dyn Write + 'a>) -> anyhow::Result<RunSummary> {
    let start_time = Instant::now();

    let config = args.to_config()?;
    let reader = CsvStatsReader::new(config.clone())?;
    debug!("Using configuration: {:?}", config);

    let files = resolve_inputs(&args.inputs)?;
    if files.is_empty() {
        bail!("No input files found in {}", args.inputs.join(", "));
    }
    info!("Processing {} files at {} bits", files.len(), config.precision);

    let mut report = create_report_writer(args.output_format, &config, out);
    report.begin()?;

    // Set up progress reporting
    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut summary = RunSummary {
        files_total: files.len(),
        ..Default::default()
    };

    for (i, path) in files.iter().enumerate() {
        if let Some(pb) = &progress_bar {
            pb.set_position(i as u64);
            pb.set_message(path.display().to_string());
        }

        match reader.process_file(path) {
            Ok(stats) => {
                summary.files_processed += 1;
                summary.columns_reported += stats.columns_with_data();

                info!(
                    "Completed {}: {} columns, {} values",
                    stats.file_name,
                    stats.columns.len(),
                    stats.ingest.values_parsed
                );
                report.write_file(&stats)?;
            }
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                summary.files_failed += 1;
                report.write_failure(&FileFailure::new(path.display().to_string(), &e))?;

                if should_abort(args, &e) {
                    error!("Stopping after failure in {}", path.display());
                    summary.aborted = true;
                    break;
                }
            }
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("done");
    }

    summary.elapsed = start_time.elapsed();
    report.finish(&summary)?;

    info!(
        "Finished: {} processed, {} failed",
        summary.files_processed, summary.files_failed
    );

    Ok(summary)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", PROGRAM_NAME, log_level)));

    let result = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .try_init()
    };

    // A subscriber installed earlier in the process keeps receiving events
    if let Err(e) = result {
        debug!("Keeping existing subscriber: {}", e);
        return Ok(());
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Whether a file failure ends the run
fn should_abort(args: &Args, error: &Error) -> bool {
    args.fail_fast && error.is_file_fatal()
}
