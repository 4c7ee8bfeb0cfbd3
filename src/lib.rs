//! Uttera - Utterance interval detection for speech experiment recordings.
//!
//! This crate finds speech intervals in session recordings by thresholding
//! a smoothed energy envelope, and writes per-recording result files.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod detect;
pub mod error;
pub mod filters;
pub mod markers;
pub mod output;
pub mod pipeline;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ConfigAction, DetectionArgs};
use config::{Config, config_file_path, load_user_config, save_user_config, validate_config};
use output::progress;
use pipeline::{
    AnalyzeOptions, Preflight, analyze_file, collect_recordings, output_dir_for, preflight,
};

pub use error::{Error, Result};

/// Main entry point for the uttera CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.detection.quiet, cli.detection.verbose);

    let config = load_user_config()?;
    validate_config(&config)?;

    if let Some(Command::Config { action }) = cli.command {
        return run_config_action(action);
    }

    // A bare invocation prints help instead of erroring.
    if cli.inputs.is_empty() {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    }

    run_analysis(&cli.inputs, &cli.detection, &config)
}

#[derive(Default)]
struct BatchTotals {
    processed: usize,
    skipped: usize,
    errors: usize,
    utterances: usize,
}

/// Run detection over every input and write result files.
fn run_analysis(inputs: &[PathBuf], args: &DetectionArgs, config: &Config) -> Result<()> {
    let batch_start = Instant::now();

    let files = collect_recordings(inputs)?;
    if files.is_empty() {
        return Err(Error::NoRecordings);
    }
    info!("Found {} recording(s) to analyze", files.len());

    // Markers load up front so a bad file fails before any audio work.
    let markers = if let Some(path) = args.markers.as_deref() {
        let times = markers::read_marker_file(path)?;
        info!("Loaded {} marker time(s) from {}", times.len(), path.display());
        Some(times)
    } else {
        None
    };

    // Command-line flags override config file values.
    let options = AnalyzeOptions {
        formats: args
            .format
            .clone()
            .unwrap_or_else(|| config.output.formats.clone()),
        smooth_window: args.smooth_window.unwrap_or(config.detection.smooth_window),
        quantile: args.quantile.unwrap_or(config.detection.quantile),
        merge_gap: args.merge_gap.unwrap_or(config.detection.merge_gap),
        mode: args.mode.unwrap_or(config.detection.mode),
        denoise: args.denoise || config.filters.denoise,
        normalize: args.normalize || config.filters.normalize,
        trim: args.trim || config.filters.trim,
        background_quantile: config.filters.background_quantile,
        peak_quantile: config.filters.peak_quantile,
        trim_top_db: config.filters.trim_top_db,
        markers,
        marker_file: args.markers.as_ref().map(|p| p.display().to_string()),
        marker_buffer: args.marker_buffer.unwrap_or(config.filters.marker_buffer),
        speed: args.speed.unwrap_or(config.filters.speed),
        save_processed: args.save_processed || config.output.save_processed,
    };

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir).map_err(|source| Error::CreateOutputDir {
            path: dir.clone(),
            source,
        })?;
    }

    let bar = progress::batch_progress(files.len(), !args.quiet);
    let mut totals = BatchTotals::default();

    for file in &files {
        let out_dir = output_dir_for(file, args.output_dir.as_deref());

        let check = preflight(file, &out_dir, &options.formats, args.force);
        if let Preflight::SkipExisting = check {
            info!("Skipping (output exists): {}", file.display());
            totals.skipped += 1;
            bar.inc(1);
            continue;
        }

        match analyze_file(file, &out_dir, &options) {
            Ok(result) => {
                totals.processed += 1;
                totals.utterances += result.utterances;
            }
            Err(e) => {
                error!("Failed to analyze {}: {}", file.display(), e);
                totals.errors += 1;
                if args.fail_fast {
                    bar.finish_with_message("Failed");
                    return Err(e);
                }
            }
        }
        bar.inc(1);
    }

    bar.finish_with_message("Complete");

    let elapsed = batch_start.elapsed().as_secs_f64();
    info!(
        "Complete: {} processed, {} skipped, {} errors, {} total utterance(s) in {elapsed:.2}s",
        totals.processed, totals.skipped, totals.errors, totals.utterances
    );

    if totals.errors > 0 && !args.fail_fast {
        warn!("{} recording(s) failed", totals.errors);
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: u8) {
    let default_level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };

    // RUST_LOG wins over the flag-derived level.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Config file already exists: {}", path.display());
                return Ok(());
            }
            let saved = save_user_config(&Config::default())?;
            println!("Wrote default config to {}", saved.display());
            Ok(())
        }
        ConfigAction::Show => {
            println!("{:#?}", load_user_config()?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_file_path()?.display());
            Ok(())
        }
    }
}
