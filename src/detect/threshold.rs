//! Detection threshold derivation.

/// Derive a detection threshold from an envelope's amplitude distribution.
///
/// Only strictly positive samples participate: an envelope dominated by
/// digital silence would otherwise drag the threshold to zero and open a
/// run on the first nonzero sample. The threshold is the value at rank
/// `floor(count * quantile)` of the ascending positive samples, clamped
/// to the last rank.
///
/// Returns `0.0` when no sample is positive, which makes every positive
/// envelope value count as speech downstream.
pub fn quantile_threshold(envelope: &[f32], quantile: f64) -> f32 {
    let mut positive: Vec<f32> = envelope.iter().copied().filter(|&v| v > 0.0).collect();
    if positive.is_empty() {
        return 0.0;
    }
    positive.sort_by(f32::total_cmp);

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let index = ((positive.len() as f64 * quantile) as usize).min(positive.len() - 1);
    positive[index]
}
