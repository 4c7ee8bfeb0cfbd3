//! Peak normalization.

/// Scale a waveform so its largest magnitude becomes 1.0.
///
/// Digital silence has no peak to scale by and is returned unchanged.
pub fn normalize_peak(samples: &[f32]) -> Vec<f32> {
    let peak = samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    if peak <= 0.0 {
        return samples.to_vec();
    }
    samples.iter().map(|s| s / peak).collect()
}
