//! Sample rate conversion built on rubato.

use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

use crate::error::{Error, Result};

/// Resample a mono waveform to the target sample rate.
///
/// Returns a copy of the input when the rates already match.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples.to_vec());
    }
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    // FFT-based synchronous resampler over fixed-size mono chunks.
    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        1024,
        1,
        1,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let frames_in = resampler.input_frames_next();
    let mut output = Vec::with_capacity(scaled_len(samples.len(), from_rate, to_rate) + frames_in);
    let mut chunk = vec![0.0f32; frames_in];

    let mut pos = 0;
    while pos < samples.len() {
        let take = (samples.len() - pos).min(frames_in);
        chunk[..take].copy_from_slice(&samples[pos..pos + take]);
        chunk[take..].fill(0.0);

        let adapter = SequentialSlice::new(&chunk, 1, frames_in).map_err(|e| Error::Resample {
            reason: format!("failed to create input adapter: {e}"),
        })?;
        let resampled = resampler
            .process(&adapter, 0, None)
            .map_err(|e| Error::Resample {
                reason: e.to_string(),
            })?;

        let data = resampled.take_data();
        // The final partial chunk was zero padded; keep only the frames
        // that correspond to real input.
        let keep = if take == frames_in {
            data.len()
        } else {
            scaled_len(take, from_rate, to_rate).min(data.len())
        };
        output.extend_from_slice(&data[..keep]);
        pos += take;
    }

    Ok(output)
}

/// Change playback speed by resampling against the nominal rate.
///
/// The waveform is resampled to `rate * factor` samples per original
/// second while the recording keeps its nominal rate, so the audio
/// stretches by the factor. A factor of 1.0 returns the input unchanged.
pub fn change_speed(samples: &[f32], sample_rate: u32, factor: f64) -> Result<Vec<f32>> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let target = (f64::from(sample_rate) * factor) as u32;
    if target == 0 {
        return Err(Error::Resample {
            reason: format!("speed factor {factor} collapses the sample rate to zero"),
        });
    }
    resample(samples, sample_rate, target)
}

/// Expected output length when resampling `len` frames.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scaled_len(len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}
