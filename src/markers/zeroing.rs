//! Stimulus zone silencing.

/// Silence the stimulus playback zones of a waveform.
///
/// Markers alternate onset and offset times; the even-indexed entries
/// are the stimulus anchors. A zone of `buffer` seconds to either side
/// of each anchor is silenced. What survives are the padded gaps: the
/// head before the first anchor's zone, the spans between consecutive
/// zones, and the tail after the last one.
///
/// Second-to-sample conversion truncates, so a zone boundary always
/// lands on the sample at or before its exact time. With no anchors at
/// all the entire output is silent.
pub fn zero_outside_markers(
    samples: &[f32],
    sample_rate: u32,
    markers: &[f64],
    buffer: f64,
) -> Vec<f32> {
    let mut output = vec![0.0f32; samples.len()];

    let anchors: Vec<f64> = markers.iter().copied().step_by(2).collect();
    let (Some(&first), Some(&last)) = (anchors.first(), anchors.last()) else {
        return output;
    };

    let rate = f64::from(sample_rate);
    #[allow(clippy::cast_precision_loss)]
    let duration = samples.len() as f64 / rate;

    let mut kept: Vec<(f64, f64)> = Vec::new();
    if first - buffer > 0.0 {
        kept.push((0.0, first - buffer));
    }
    for pair in anchors.windows(2) {
        let start = pair[0] + buffer;
        let end = pair[1] - buffer;
        if end > start {
            kept.push((start, end));
        }
    }
    if last + buffer < duration {
        kept.push((last + buffer, duration));
    }

    for (start, end) in kept {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let start_idx = ((start * rate) as usize).min(samples.len());
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let end_idx = ((end * rate) as usize).min(samples.len());
        if end_idx > start_idx {
            output[start_idx..end_idx].copy_from_slice(&samples[start_idx..end_idx]);
        }
    }
    output
}
