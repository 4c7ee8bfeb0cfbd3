//! Stimulus marker handling.
//!
//! Latency sessions record when each stimulus was presented. Marker
//! files carry those times; the zeroing pass silences the stimulus
//! playback zones so detection only sees the participant's responses.

mod parse;
mod zeroing;

pub use parse::read_marker_file;
pub use zeroing::zero_outside_markers;
