//! Batch coordination and per-recording analysis.

mod coordinator;
mod processor;

pub use coordinator::{
    AnalyzeOptions, Preflight, collect_recordings, output_dir_for, output_path_for, preflight,
    processed_path_for,
};
pub use processor::{AnalysisResult, analyze_file};
