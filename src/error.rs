//! Error types for uttera.

use std::path::PathBuf;

/// Result type alias for uttera operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for uttera.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Plain I/O failure without more specific context.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration
    /// No configuration directory exists on this platform.
    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("could not read config file '{path}'")]
    ConfigLoad {
        /// Config file path.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML.
    #[error("could not parse config file '{path}'")]
    ConfigParse {
        /// Config file path.
        path: PathBuf,
        /// TOML parse cause.
        #[source]
        source: toml::de::Error,
    },

    /// A config value is outside its allowed range.
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// What is wrong with the value.
        message: String,
    },

    /// The config file could not be written.
    #[error("could not write config file '{path}'")]
    ConfigSave {
        /// Config file path.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// The config could not be rendered as TOML.
    #[error("could not serialize config")]
    ConfigEncode {
        /// TOML serialize cause.
        #[source]
        source: toml::ser::Error,
    },

    // Input and decoding
    /// Input paths yielded no usable recordings.
    #[error("no valid audio files found in the given inputs")]
    NoRecordings,

    /// The audio container could not be opened or probed.
    #[error("could not open audio file '{path}'")]
    AudioOpen {
        /// Audio file path.
        path: PathBuf,
        /// Probe or I/O cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Decoding the audio stream failed partway through.
    #[error("could not decode audio from '{path}'")]
    AudioDecode {
        /// Audio file path.
        path: PathBuf,
        /// Decoder cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The container holds no decodable audio track.
    #[error("no audio track found in '{path}'")]
    NoAudioTrack {
        /// Audio file path.
        path: PathBuf,
    },

    // Conditioning
    /// Resampling for the speed change failed.
    #[error("could not resample audio: {reason}")]
    Resample {
        /// What the resampler rejected.
        reason: String,
    },

    /// The marker file could not be read.
    #[error("could not read marker file '{path}'")]
    MarkerFileRead {
        /// Marker file path.
        path: PathBuf,
        /// Reader cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The marker file contents violate the marker format.
    #[error("invalid marker file: {message}")]
    InvalidMarkerFile {
        /// Which line is bad and why.
        message: String,
    },

    // Detection
    /// Merged interval count does not match the fixed experiment grid.
    #[error("expected {expected} merged intervals for the fixed-grid protocol, found {actual}")]
    SegmentCountMismatch {
        /// Interval count the grid requires.
        expected: usize,
        /// Interval count actually detected.
        actual: usize,
    },

    // Outputs
    /// Writing the processed waveform failed.
    #[error("could not write WAV file '{path}'")]
    WavWrite {
        /// WAV file path.
        path: PathBuf,
        /// Encoder cause.
        #[source]
        source: hound::Error,
    },

    /// The output directory could not be created.
    #[error("could not create output directory '{path}'")]
    CreateOutputDir {
        /// Output directory path.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// Serializing the JSON report failed.
    #[error("could not write JSON output file '{path}'")]
    JsonWrite {
        /// JSON file path.
        path: PathBuf,
        /// Serializer cause.
        #[source]
        source: serde_json::Error,
    },
}
