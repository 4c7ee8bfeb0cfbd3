//! Energy envelope extraction.
//!
//! The envelope is the full-wave rectified waveform passed through a
//! centered moving average. Positions near the edges average against
//! implicit zero padding, so the envelope tapers there instead of
//! shrinking the output.

/// Smooth a signal with a centered moving average of `window` samples.
///
/// The output has the same length as the input. Windows that extend past
/// either edge treat the missing samples as zero and still divide by the
/// full window length. For even window lengths the window sits one sample
/// earlier than center, matching the convention of discrete convolution
/// with a same-length output.
///
/// A window shorter than 2 returns the input unchanged.
pub fn smooth(samples: &[f32], window: usize) -> Vec<f32> {
    let n = samples.len();
    if window <= 1 || n == 0 {
        return samples.to_vec();
    }

    // Prefix sums in f64 keep long recordings from accumulating error.
    let mut prefix = vec![0.0f64; n + 1];
    for (i, &s) in samples.iter().enumerate() {
        prefix[i + 1] = prefix[i] + f64::from(s);
    }

    // Output index i averages input indices [i - trail, i + lead] where
    // lead = (window - 1) / 2 and trail = window - 1 - lead.
    let lead = (window - 1) / 2;

    #[allow(clippy::cast_precision_loss)]
    let divisor = window as f64;

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let hi = (i + lead + 1).min(n);
        let lo = (i + lead + 1).saturating_sub(window);
        let sum = prefix[hi] - prefix[lo];
        #[allow(clippy::cast_possible_truncation)]
        out.push((sum / divisor) as f32);
    }
    out
}

/// Compute the energy envelope of a waveform.
///
/// Rectifies the signal to absolute amplitude, then smooths it with a
/// centered moving average of `window` samples.
pub fn energy_envelope(samples: &[f32], window: usize) -> Vec<f32> {
    let rectified: Vec<f32> = samples.iter().map(|s| s.abs()).collect();
    smooth(&rectified, window)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_preserves_length() {
        let samples = vec![0.5; 100];
        assert_eq!(smooth(&samples, 5).len(), 100);
        assert_eq!(smooth(&samples, 4).len(), 100);
        assert_eq!(smooth(&samples, 101).len(), 100);
    }

    #[test]
    fn test_smooth_window_below_two_is_identity() {
        let samples = vec![0.3, -0.7, 0.1];
        assert_eq!(smooth(&samples, 0), samples);
        assert_eq!(smooth(&samples, 1), samples);
    }

    #[test]
    fn test_smooth_empty_input() {
        assert!(smooth(&[], 5).is_empty());
    }

    #[test]
    fn test_smooth_interior_is_plain_average() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let out = smooth(&samples, 3);
        assert!((out[1] - 2.0).abs() < 1e-6);
        assert!((out[2] - 3.0).abs() < 1e-6);
        assert!((out[3] - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_edges_taper_against_zero_padding() {
        // Constant ones: edge windows include one padded zero each side.
        let samples = vec![1.0; 5];
        let out = smooth(&samples, 3);
        assert!((out[0] - 2.0 / 3.0).abs() < 1e-6);
        assert!((out[4] - 2.0 / 3.0).abs() < 1e-6);
        assert!((out[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_even_window_leans_left() {
        // An even window covers [i - w/2, i + w/2 - 1]; the impulse at
        // index 2 spreads over outputs 2 and 3, not 1 and 2.
        let samples = vec![0.0, 0.0, 1.0, 0.0, 0.0];
        let out = smooth(&samples, 2);
        assert!((out[1] - 0.0).abs() < 1e-6);
        assert!((out[2] - 0.5).abs() < 1e-6);
        assert!((out[3] - 0.5).abs() < 1e-6);
        assert!((out[4] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_smooth_window_longer_than_signal() {
        let samples = vec![1.0, 1.0];
        let out = smooth(&samples, 10);
        // Every window covers both samples plus eight zeros.
        assert!((out[0] - 0.2).abs() < 1e-6);
        assert!((out[1] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_rectifies_before_smoothing() {
        let samples = vec![-1.0, 1.0, -1.0, 1.0, -1.0];
        let out = energy_envelope(&samples, 3);
        // Rectified signal is constant one; interior stays at one.
        assert!((out[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_of_silence_is_silence() {
        let samples = vec![0.0; 50];
        let out = energy_envelope(&samples, 5);
        assert!(out.iter().all(|&v| v == 0.0));
    }
}
