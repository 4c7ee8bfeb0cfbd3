//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{DetectionMode, OutputFormat};

/// Utterance interval detection for speech experiment recordings.
#[derive(Debug, Parser)]
#[command(name = "uttera")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional subcommand; plain inputs run detection.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Recordings or directories of recordings to analyze.
    pub inputs: Vec<PathBuf>,

    /// Detection and output options.
    #[command(flatten)]
    pub detection: DetectionArgs,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or create the config file.
    Config {
        /// What to do with the config file.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions on the per-user config file.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Write a default config file.
    Init,
    /// Print the loaded configuration.
    Show,
    /// Print where the config file lives.
    Path,
}

/// Options controlling detection and output.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct DetectionArgs {
    /// Envelope smoothing window in samples.
    #[arg(short = 'w', long, env = "UTTERA_SMOOTH_WINDOW")]
    pub smooth_window: Option<usize>,

    /// Detection threshold quantile, strictly between 0.0 and 1.0.
    #[arg(long, value_parser = parse_quantile, env = "UTTERA_QUANTILE")]
    pub quantile: Option<f64>,

    /// Maximum silent gap in seconds merged into one utterance.
    #[arg(short = 'g', long, value_parser = parse_seconds, env = "UTTERA_MERGE_GAP")]
    pub merge_gap: Option<f64>,

    /// Detection mode (free, grid).
    #[arg(short, long, env = "UTTERA_MODE")]
    pub mode: Option<DetectionMode>,

    /// Apply the noise filter before detection.
    #[arg(long)]
    pub denoise: bool,

    /// Apply peak normalization before detection.
    #[arg(long)]
    pub normalize: bool,

    /// Trim leading and trailing silence before detection.
    #[arg(long)]
    pub trim: bool,

    /// Playback speed factor applied before analysis.
    #[arg(long, value_parser = parse_speed, env = "UTTERA_SPEED")]
    pub speed: Option<f64>,

    /// Marker file with stimulus times for zeroing.
    #[arg(long, env = "UTTERA_MARKERS")]
    pub markers: Option<PathBuf>,

    /// Half-width in seconds of the zone kept around each marker.
    #[arg(long, value_parser = parse_seconds, env = "UTTERA_MARKER_BUFFER")]
    pub marker_buffer: Option<f64>,

    /// Result formats to write, comma-separated (csv,audacity,json).
    #[arg(short, long, value_delimiter = ',', env = "UTTERA_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Directory for result files (default: next to each input).
    #[arg(short, long, env = "UTTERA_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Save the processed waveform next to the results.
    #[arg(long)]
    pub save_processed: bool,

    /// Reanalyze recordings whose outputs already exist.
    #[arg(long)]
    pub force: bool,

    /// Abort the run at the first failed recording.
    #[arg(long)]
    pub fail_fast: bool,

    /// Silence progress and per-file logging.
    #[arg(short, long)]
    pub quiet: bool,

    /// More verbose logging (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse and validate a threshold quantile.
fn parse_quantile(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;

    if value <= 0.0 || value >= 1.0 {
        return Err(format!("quantile must be strictly between 0.0 and 1.0, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a non-negative duration in seconds.
fn parse_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;

    if value < 0.0 || !value.is_finite() {
        return Err(format!("value must be a non-negative number of seconds, got {value}"));
    }

    Ok(value)
}

/// Parse and validate a speed factor.
fn parse_speed(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;

    if value <= 0.0 || !value.is_finite() {
        return Err(format!("speed must be a positive number, got {value}"));
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantile_valid() {
        assert_eq!(parse_quantile("0.5").ok(), Some(0.5));
        assert_eq!(parse_quantile("0.96").ok(), Some(0.96));
    }

    #[test]
    fn test_parse_quantile_invalid() {
        assert!(parse_quantile("0.0").is_err());
        assert!(parse_quantile("1.0").is_err());
        assert!(parse_quantile("1.5").is_err());
        assert!(parse_quantile("abc").is_err());
    }

    #[test]
    fn test_parse_seconds_valid() {
        assert_eq!(parse_seconds("0").ok(), Some(0.0));
        assert_eq!(parse_seconds("2.5").ok(), Some(2.5));
    }

    #[test]
    fn test_parse_seconds_invalid() {
        assert!(parse_seconds("-1.0").is_err());
        assert!(parse_seconds("inf").is_err());
        assert!(parse_seconds("abc").is_err());
    }

    #[test]
    fn test_parse_speed_valid() {
        assert_eq!(parse_speed("0.75").ok(), Some(0.75));
        assert_eq!(parse_speed("2").ok(), Some(2.0));
    }

    #[test]
    fn test_parse_speed_invalid() {
        assert!(parse_speed("0").is_err());
        assert!(parse_speed("-0.5").is_err());
        assert!(parse_speed("abc").is_err());
    }

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["uttera", "session.wav"]).unwrap();
        assert_eq!(cli.inputs.len(), 1);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "uttera",
            "session.wav",
            "-m",
            "grid",
            "-g",
            "1.5",
            "--quantile",
            "0.9",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.detection.mode, Some(DetectionMode::Grid));
        assert_eq!(cli.detection.merge_gap, Some(1.5));
        assert_eq!(cli.detection.quantile, Some(0.9));
        assert!(cli.detection.quiet);
    }

    #[test]
    fn test_cli_parse_grid_shorthand() {
        let cli = Cli::try_parse_from(["uttera", "session.wav", "--mode", "5:6"]).unwrap();
        assert_eq!(cli.detection.mode, Some(DetectionMode::Grid));
    }

    #[test]
    fn test_cli_parse_format_list() {
        let cli =
            Cli::try_parse_from(["uttera", "session.wav", "-f", "csv,audacity,json"]).unwrap();
        assert_eq!(
            cli.detection.format,
            Some(vec![
                OutputFormat::Csv,
                OutputFormat::Audacity,
                OutputFormat::Json,
            ])
        );
    }

    #[test]
    fn test_cli_parse_markers() {
        let cli = Cli::try_parse_from([
            "uttera",
            "session.wav",
            "--markers",
            "stimuli.txt",
            "--marker-buffer",
            "3.0",
        ])
        .unwrap();
        assert_eq!(cli.detection.markers, Some(PathBuf::from("stimuli.txt")));
        assert_eq!(cli.detection.marker_buffer, Some(3.0));
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["uttera", "config", "show"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_rejects_bad_mode() {
        let cli = Cli::try_parse_from(["uttera", "session.wav", "-m", "strict"]);
        assert!(cli.is_err());
    }
}
