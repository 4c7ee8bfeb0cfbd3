//! Amplitude-gated noise suppression.
//!
//! Recordings from experiment booths carry a steady background floor
//! plus sporadic low-level artifacts. The filter removes both with two
//! amplitude gates and a median pass: samples below the background
//! quantile are zeroed, survivors below the peak quantile are zeroed,
//! and a short median filter drops the isolated spikes that remain.

use crate::constants::noise;

/// Suppress background noise in a waveform.
///
/// `background_quantile` selects the amplitude level treated as the
/// noise floor over all samples; `peak_quantile` selects the gate level
/// over the magnitudes that survive the floor. Samples are kept with
/// their sign, never rescaled. Both quantiles interpolate linearly
/// between order statistics.
pub fn apply_noise_filter(
    samples: &[f32],
    background_quantile: f64,
    peak_quantile: f64,
) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }

    let magnitudes: Vec<f32> = samples.iter().map(|s| s.abs()).collect();
    let background = linear_quantile(&magnitudes, background_quantile);

    let mut cleaned: Vec<f32> = samples
        .iter()
        .zip(&magnitudes)
        .map(|(&s, &m)| if m >= background { s } else { 0.0 })
        .collect();

    let surviving: Vec<f32> = cleaned
        .iter()
        .map(|s| s.abs())
        .filter(|&m| m > 0.0)
        .collect();
    if !surviving.is_empty() {
        let peak = linear_quantile(&surviving, peak_quantile);
        for s in &mut cleaned {
            if s.abs() < peak {
                *s = 0.0;
            }
        }
    }

    median_filter(&cleaned, noise::MEDIAN_KERNEL)
}

/// Linearly interpolated quantile of a non-empty sample set.
fn linear_quantile(values: &[f32], quantile: f64) -> f32 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);

    #[allow(clippy::cast_precision_loss)]
    let pos = (sorted.len() - 1) as f64 * quantile;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = pos.floor() as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hi = pos.ceil() as usize;

    if lo == hi {
        sorted[lo]
    } else {
        #[allow(clippy::cast_precision_loss)]
        let frac = pos - lo as f64;
        let a = f64::from(sorted[lo]);
        let b = f64::from(sorted[hi]);
        #[allow(clippy::cast_possible_truncation)]
        let value = (a + (b - a) * frac) as f32;
        value
    }
}

/// Centered median filter with zero padding at both edges.
///
/// `kernel` must be odd; the median of each window is its middle order
/// statistic.
fn median_filter(samples: &[f32], kernel: usize) -> Vec<f32> {
    let n = samples.len();
    if kernel <= 1 || n == 0 {
        return samples.to_vec();
    }
    let half = kernel / 2;
    let mut out = Vec::with_capacity(n);
    let mut window = Vec::with_capacity(kernel);

    for i in 0..n {
        window.clear();
        for j in 0..kernel {
            match (i + j).checked_sub(half) {
                Some(idx) if idx < n => window.push(samples[idx]),
                _ => window.push(0.0),
            }
        }
        window.sort_by(f32::total_cmp);
        out.push(window[half]);
    }
    out
}
