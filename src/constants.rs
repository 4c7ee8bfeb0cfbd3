//! Shared constants.
//!
//! Numeric defaults and file naming live here so the CLI, the config
//! schema, and the pipeline agree on them.

/// Program name, used for the config directory and in messages.
pub const APP_NAME: &str = "uttera";

/// Default moving-average window length in samples for envelope smoothing.
pub const DEFAULT_SMOOTH_WINDOW: usize = 5;

/// Default quantile used to derive the detection threshold from the envelope.
pub const DEFAULT_QUANTILE: f64 = 0.96;

/// Default maximum silent gap in seconds merged into one utterance.
pub const DEFAULT_MERGE_GAP: f64 = 2.0;

/// Default half-width in seconds of the zone kept around each stimulus marker.
pub const DEFAULT_MARKER_BUFFER: f64 = 4.0;

/// Fixed experiment grid dimensions.
///
/// Latency experiments following the fixed protocol present a set number
/// of trials, each repeated the same number of times. Recordings analyzed
/// in grid mode must yield exactly `INTERVALS` utterances or the run is
/// rejected.
pub mod grid {
    /// Number of stimulus trials per session.
    pub const TRIALS: usize = 5;

    /// Repetitions of each trial.
    pub const REPETITIONS: usize = 6;

    /// Total utterance intervals a grid session must produce.
    pub const INTERVALS: usize = TRIALS * REPETITIONS;
}

/// Noise filter constants.
pub mod noise {
    /// Quantile of absolute amplitude treated as background noise.
    pub const DEFAULT_BACKGROUND_QUANTILE: f64 = 0.1;

    /// Quantile of surviving magnitudes used as the peak gate.
    pub const DEFAULT_PEAK_QUANTILE: f64 = 0.96;

    /// Kernel width of the median filter applied after gating. Must be odd.
    pub const MEDIAN_KERNEL: usize = 5;
}

/// Silence trimming constants.
pub mod trim {
    /// Analysis frame length in samples for RMS computation.
    pub const FRAME_LENGTH: usize = 2048;

    /// Hop between successive RMS frames in samples.
    pub const HOP_LENGTH: usize = 512;

    /// Default threshold in decibels below peak RMS treated as silence.
    pub const DEFAULT_TOP_DB: f32 = 20.0;
}

/// Quantile value bounds.
pub mod quantile {
    /// Minimum valid quantile value (exclusive for the detection threshold).
    pub const MIN: f64 = 0.0;
    /// Maximum valid quantile value (exclusive for the detection threshold).
    pub const MAX: f64 = 1.0;
}

/// Result file suffixes appended to the recording stem.
pub mod suffixes {
    /// Utterance table.
    pub const CSV: &str = ".utterances.csv";
    /// Audacity label track.
    pub const AUDACITY: &str = ".utterances.txt";
    /// JSON report.
    pub const JSON: &str = ".utterances.json";
    /// Conditioned waveform copy.
    pub const PROCESSED_WAV: &str = ".processed.wav";
}

/// Input extensions recognized when scanning directories.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "mp3"];

/// Decimal places used when formatting interval times in seconds.
pub const TIME_DECIMAL_PLACES: usize = 3;
