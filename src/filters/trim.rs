//! Leading and trailing silence removal.
//!
//! Silence is judged per analysis frame: a frame whose RMS sits more
//! than `top_db` decibels below the loudest frame counts as silent. The
//! kept region spans from the first non-silent frame to the last one,
//! rounded outward to hop boundaries.

use crate::constants::trim;

/// Trim frame-level silence from both ends of a waveform.
///
/// Returns the trimmed samples together with the half-open sample range
/// `(start, end)` that was kept from the input. A waveform with no frame
/// above the silence cutoff trims to nothing and reports `(0, 0)`.
pub fn trim_silence(samples: &[f32], top_db: f32) -> (Vec<f32>, (usize, usize)) {
    let rms = frame_rms(samples, trim::FRAME_LENGTH, trim::HOP_LENGTH);

    let peak = rms.iter().fold(0.0f32, |acc, &r| acc.max(r));
    let cutoff = peak * 10.0f32.powf(-top_db / 20.0);

    let Some(first) = rms.iter().position(|&r| r > cutoff) else {
        return (Vec::new(), (0, 0));
    };
    let last = rms.iter().rposition(|&r| r > cutoff).unwrap_or(first);

    let start = first * trim::HOP_LENGTH;
    let end = ((last + 1) * trim::HOP_LENGTH).min(samples.len());
    (samples[start..end].to_vec(), (start, end))
}

/// Root-mean-square energy per centered frame.
///
/// Frame `c` is centered on sample `c * hop_length`; samples outside the
/// waveform count as zero and the divisor is always the full frame.
fn frame_rms(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f32> {
    let n = samples.len();
    let half = frame_length / 2;
    let count = n / hop_length + 1;

    let mut rms = Vec::with_capacity(count);
    for c in 0..count {
        let center = c * hop_length;
        let lo = center.saturating_sub(half);
        let hi = (center + half).min(n);

        let mut acc = 0.0f64;
        for &s in &samples[lo..hi] {
            acc += f64::from(s) * f64::from(s);
        }
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let value = (acc / frame_length as f64).sqrt() as f32;
        rms.push(value);
    }
    rms
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn signal_with_burst(len: usize, burst: std::ops::Range<usize>) -> Vec<f32> {
        let mut samples = vec![0.0f32; len];
        for (i, s) in samples[burst].iter_mut().enumerate() {
            *s = if i % 2 == 0 { 0.8 } else { -0.8 };
        }
        samples
    }

    #[test]
    fn test_trim_empty_input() {
        let (out, range) = trim_silence(&[], 20.0);
        assert!(out.is_empty());
        assert_eq!(range, (0, 0));
    }

    #[test]
    fn test_trim_all_silence() {
        let samples = vec![0.0; 8192];
        let (out, range) = trim_silence(&samples, 20.0);
        assert!(out.is_empty());
        assert_eq!(range, (0, 0));
    }

    #[test]
    fn test_trim_removes_silent_ends() {
        // One second of silence, a burst, another second of silence.
        let samples = signal_with_burst(66150, 22050..44100);
        let (out, (start, end)) = trim_silence(&samples, 20.0);
        assert!(!out.is_empty());
        assert_eq!(out.len(), end - start);
        // Bounds land on hop boundaries around the burst.
        assert_eq!(start % trim::HOP_LENGTH, 0);
        assert!(start <= 22050);
        assert!(start > 22050 - 2 * trim::FRAME_LENGTH);
        assert!(end >= 44100);
        assert!(end < 44100 + 2 * trim::FRAME_LENGTH);
    }

    #[test]
    fn test_trim_keeps_loud_signal_whole() {
        let samples = signal_with_burst(16384, 0..16384);
        let (out, (start, end)) = trim_silence(&samples, 20.0);
        assert_eq!(start, 0);
        assert_eq!(end, 16384);
        assert_eq!(out.len(), 16384);
    }

    #[test]
    fn test_trim_range_matches_input_slice() {
        let samples = signal_with_burst(32768, 8192..24576);
        let (out, (start, end)) = trim_silence(&samples, 20.0);
        assert_eq!(out, samples[start..end].to_vec());
    }

    #[test]
    fn test_frame_rms_constant_signal() {
        let samples = vec![0.5f32; 4096];
        let rms = frame_rms(&samples, 2048, 512);
        assert_eq!(rms.len(), 4096 / 512 + 1);
        // An interior frame sees only the constant value.
        assert!((rms[4] - 0.5).abs() < 1e-4);
        // The first frame averages against half a window of padding.
        assert!(rms[0] < 0.5);
    }
}
