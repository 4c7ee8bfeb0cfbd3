//! Utterance detection pipeline.
//!
//! Detection proceeds in four stages: the waveform is rectified and
//! smoothed into an energy envelope, a threshold is derived from the
//! envelope's amplitude distribution, contiguous supra-threshold runs
//! are located, and nearby runs are merged into utterance intervals.

mod envelope;
mod merge;
mod runs;
mod threshold;

pub use envelope::{energy_envelope, smooth};
pub use merge::{MergePolicy, TimeInterval, merge_runs};
pub use runs::{RawSegment, detect_runs};
pub use threshold::quantile_threshold;
