//! Output type definitions.

use crate::constants::grid;
use crate::detect::TimeInterval;

/// A detected utterance interval.
#[derive(Debug, Clone)]
pub struct Utterance {
    /// One-based position within the recording.
    pub ordinal: usize,
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Grid slot, present when detection ran in grid mode.
    pub slot: Option<TrialSlot>,
}

/// Position of an utterance within the fixed experiment grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSlot {
    /// One-based trial number.
    pub trial: usize,
    /// One-based repetition within the trial.
    pub repetition: usize,
}

impl Utterance {
    /// Convert merged intervals into utterances.
    ///
    /// In grid mode the intervals fill the experiment grid in recording
    /// order: repetitions advance fastest, then trials.
    pub fn from_intervals(intervals: &[TimeInterval], grid_mode: bool) -> Vec<Self> {
        intervals
            .iter()
            .enumerate()
            .map(|(i, interval)| {
                let slot = grid_mode.then(|| TrialSlot {
                    trial: i / grid::REPETITIONS + 1,
                    repetition: i % grid::REPETITIONS + 1,
                });
                Self {
                    ordinal: i + 1,
                    start: interval.start,
                    end: interval.end,
                    slot,
                }
            })
            .collect()
    }

    /// Utterance duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Human-readable label for annotation outputs.
    pub fn label(&self) -> String {
        self.slot.map_or_else(
            || format!("utterance {}", self.ordinal),
            |slot| format!("trial {} rep {}", slot.trial, slot.repetition),
        )
    }
}
