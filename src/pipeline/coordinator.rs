//! Input discovery and output path planning for batch runs.

use crate::config::{DetectionMode, OutputFormat};
use crate::constants::{AUDIO_EXTENSIONS, suffixes};
use crate::error::Result;
use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Resolved settings for analyzing a single recording.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Result formats to write for each recording.
    pub formats: Vec<OutputFormat>,
    /// Envelope smoothing window in samples.
    pub smooth_window: usize,
    /// Quantile used to derive the detection threshold.
    pub quantile: f64,
    /// Maximum silent gap in seconds merged into one utterance.
    pub merge_gap: f64,
    /// Detection mode.
    pub mode: DetectionMode,
    /// Apply the noise filter before detection.
    pub denoise: bool,
    /// Apply peak normalization before detection.
    pub normalize: bool,
    /// Trim leading and trailing silence before detection.
    pub trim: bool,
    /// Noise floor quantile for the noise filter.
    pub background_quantile: f64,
    /// Peak gate quantile for the noise filter.
    pub peak_quantile: f64,
    /// Silence threshold in decibels below peak for trimming.
    pub trim_top_db: f32,
    /// Stimulus times in seconds for marker zeroing, if any.
    pub markers: Option<Vec<f64>>,
    /// Name of the marker file the stimulus times came from.
    pub marker_file: Option<String>,
    /// Half-width in seconds of the zone kept around each marker.
    pub marker_buffer: f64,
    /// Playback speed factor applied before analysis.
    pub speed: f64,
    /// Save the processed waveform next to the results.
    pub save_processed: bool,
}

/// Outcome of the pre-flight check for one recording.
#[derive(Debug)]
pub enum Preflight {
    /// Run detection on this file.
    Analyze,
    /// All outputs exist already; leave them alone.
    SkipExisting,
}

/// Output directory for a recording.
///
/// The explicit directory wins when given; otherwise results land next
/// to the input.
pub fn output_dir_for(input: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => input
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
    }
}

/// Result file path for `input` in `format`, inside `output_dir`.
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let suffix = match format {
        OutputFormat::Csv => suffixes::CSV,
        OutputFormat::Audacity => suffixes::AUDACITY,
        OutputFormat::Json => suffixes::JSON,
    };

    output_dir.join(format!("{}{suffix}", stem_lossy(input)))
}

/// Path for the conditioned waveform copy of `input`.
pub fn processed_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}{}", stem_lossy(input), suffixes::PROCESSED_WAV))
}

/// File stem with non-UTF-8 sequences replaced, never empty.
fn stem_lossy(input: &Path) -> Cow<'_, str> {
    input
        .file_stem()
        .map_or(Cow::Borrowed("output"), OsStr::to_string_lossy)
}

/// Decide whether a recording still needs analysis.
///
/// Without `force`, a file whose outputs all exist is skipped so
/// re-runs only fill in what is missing.
pub fn preflight(
    input: &Path,
    output_dir: &Path,
    formats: &[OutputFormat],
    force: bool,
) -> Preflight {
    if force {
        return Preflight::Analyze;
    }

    let missing = formats
        .iter()
        .any(|fmt| !output_path_for(input, output_dir, *fmt).exists());
    if missing {
        Preflight::Analyze
    } else {
        Preflight::SkipExisting
    }
}

/// Expand the given paths into the list of recordings to analyze.
///
/// Plain files are taken when they carry a known audio extension;
/// directories are walked recursively.
pub fn collect_recordings(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for path in paths {
        if path.is_dir() {
            walk_dir(path, &mut found)?;
        } else if !path.exists() {
            warn!("Ignoring missing path: {}", path.display());
        } else if has_audio_extension(path) {
            found.push(path.clone());
        }
    }

    Ok(found)
}

/// Walk `dir` collecting audio files.
fn walk_dir(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_dir(&path, found)?;
        } else if has_audio_extension(&path) {
            found.push(path);
        }
    }

    Ok(())
}

/// Whether `path` carries one of the recognized audio extensions.
fn has_audio_extension(path: &Path) -> bool {
    // Extensions compare as OsStr so non-UTF-8 names still match.
    let Some(ext) = path.extension() else {
        return false;
    };
    AUDIO_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
}
