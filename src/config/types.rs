//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MARKER_BUFFER, DEFAULT_MERGE_GAP, DEFAULT_QUANTILE, DEFAULT_SMOOTH_WINDOW, noise, trim,
};
use crate::detect::MergePolicy;

/// Root of the config file schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Detection settings.
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Filter settings.
    #[serde(default)]
    pub filters: FiltersConfig,

    /// Result file settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Envelope smoothing window in samples.
    pub smooth_window: usize,

    /// Quantile used to derive the detection threshold.
    pub quantile: f64,

    /// Maximum silent gap in seconds merged into one utterance.
    pub merge_gap: f64,

    /// Detection mode.
    pub mode: DetectionMode,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            smooth_window: DEFAULT_SMOOTH_WINDOW,
            quantile: DEFAULT_QUANTILE,
            merge_gap: DEFAULT_MERGE_GAP,
            mode: DetectionMode::default(),
        }
    }
}

/// Waveform conditioning settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
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

    /// Half-width in seconds of the zone kept around each marker.
    pub marker_buffer: f64,

    /// Playback speed factor applied before analysis.
    pub speed: f64,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            denoise: false,
            normalize: false,
            trim: false,
            background_quantile: noise::DEFAULT_BACKGROUND_QUANTILE,
            peak_quantile: noise::DEFAULT_PEAK_QUANTILE,
            trim_top_db: trim::DEFAULT_TOP_DB,
            marker_buffer: DEFAULT_MARKER_BUFFER,
            speed: 1.0,
        }
    }
}

/// Result file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output formats to write.
    pub formats: Vec<OutputFormat>,

    /// Save the processed waveform next to the results.
    pub save_processed: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Csv],
            save_processed: false,
        }
    }
}

/// How many utterances a session is expected to contain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Accept any number of utterances.
    #[default]
    Free,
    /// Require the full fixed grid of trials and repetitions.
    #[serde(alias = "5:6")]
    Grid,
}

impl DetectionMode {
    /// Merge policy implied by this mode.
    pub const fn policy(self) -> MergePolicy {
        match self {
            Self::Free => MergePolicy::Free,
            Self::Grid => MergePolicy::fixed_grid(),
        }
    }
}

impl std::fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Grid => write!(f, "grid"),
        }
    }
}

impl std::str::FromStr for DetectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "grid" | "5:6" => Ok(Self::Grid),
            other => Err(format!("unknown detection mode: {other}")),
        }
    }
}

/// Result file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated rows, one per utterance.
    Csv,
    /// Tab-separated Audacity label track.
    Audacity,
    /// JSON report with settings and summary.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Audacity => write!(f, "audacity"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "audacity" | "labels" => Ok(Self::Audacity),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
