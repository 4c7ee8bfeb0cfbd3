//! 16-bit PCM output via hound.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{Error, Result};

/// Write mono f32 samples to a 16-bit PCM WAV file.
///
/// Samples are clamped to [-1.0, 1.0] before quantization.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| wav_error(path, e))?;

    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let quantized = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer
            .write_sample(quantized)
            .map_err(|e| wav_error(path, e))?;
    }

    writer.finalize().map_err(|e| wav_error(path, e))?;
    Ok(())
}

fn wav_error(path: &Path, source: hound::Error) -> Error {
    Error::WavWrite {
        path: path.to_path_buf(),
        source,
    }
}
