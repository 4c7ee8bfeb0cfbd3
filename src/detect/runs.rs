//! Supra-threshold run detection.

/// A contiguous run of envelope samples above the threshold.
///
/// Bounds are sample indices, half-open: `start` is the first sample in
/// the run and `end` is one past the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSegment {
    /// First sample index of the run.
    pub start: usize,
    /// One past the last sample index of the run.
    pub end: usize,
}

impl RawSegment {
    /// Length of the run in samples.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the run spans no samples.
    pub const fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Locate all runs where the envelope exceeds the threshold.
///
/// A run opens at a sample strictly above the threshold and closes at
/// the next sample at or below it; a sample exactly at the threshold
/// belongs to silence. A run still open at the end of the envelope is
/// closed at its length.
pub fn detect_runs(envelope: &[f32], threshold: f32) -> Vec<RawSegment> {
    let mut segments = Vec::new();
    let mut open: Option<usize> = None;

    for (i, &value) in envelope.iter().enumerate() {
        match open {
            None if value > threshold => open = Some(i),
            Some(start) if value <= threshold => {
                segments.push(RawSegment { start, end: i });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        segments.push(RawSegment {
            start,
            end: envelope.len(),
        });
    }
    segments
}
