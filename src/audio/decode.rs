//! Recording decode via symphonia.
//!
//! Everything downstream works on mono f32, so decoding mixes channels
//! down and hides the container format entirely.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::conv::IntoSample;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;

use crate::error::{Error, Result};

/// A decoded recording as mono f32 samples.
#[derive(Debug, Clone)]
pub struct Recording {
    /// Samples in the range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Recording {
    /// Duration of the recording in seconds.
    pub fn duration_secs(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let len = self.samples.len() as f64;
        len / f64::from(self.sample_rate)
    }
}

/// Decode an audio file to a mono recording.
///
/// Supports WAV, FLAC, and MP3 input. Multi-channel audio is mixed down
/// to mono by averaging the channels.
pub fn decode_audio_file(path: &Path) -> Result<Recording> {
    let mut reader = probe_file(path)?;

    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTrack {
            path: path.to_path_buf(),
        })?;
    let wanted = track.id;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_error(path, e))?;

    let mut samples = Vec::new();
    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(decode_error(path, e)),
        };
        if packet.track_id() != wanted {
            continue;
        }

        match decoder.decode(&packet).map_err(|e| decode_error(path, e))? {
            AudioBufferRef::U8(buf) => downmix_into(buf.as_ref(), &mut samples),
            AudioBufferRef::S16(buf) => downmix_into(buf.as_ref(), &mut samples),
            AudioBufferRef::S24(buf) => downmix_into(buf.as_ref(), &mut samples),
            AudioBufferRef::S32(buf) => downmix_into(buf.as_ref(), &mut samples),
            AudioBufferRef::F32(buf) => downmix_into(buf.as_ref(), &mut samples),
            AudioBufferRef::F64(buf) => downmix_into(buf.as_ref(), &mut samples),
            _ => {}
        }
    }

    Ok(Recording {
        samples,
        sample_rate,
    })
}

/// Open `path` and probe it into a container format reader.
fn probe_file(path: &Path) -> Result<Box<dyn FormatReader>> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    let stream = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    Ok(probed.format)
}

fn decode_error(path: &Path, source: symphonia::core::errors::Error) -> Error {
    Error::AudioDecode {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}

/// Append a decoded buffer to `out`, mixing channels down to mono.
fn downmix_into<S>(buf: &AudioBuffer<S>, out: &mut Vec<f32>)
where
    S: Sample + IntoSample<f32>,
{
    let channels = buf.spec().channels.count();
    if channels == 1 {
        out.extend(buf.chan(0).iter().map(|&s| s.into_sample()));
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / channels as f32;
    for frame in 0..buf.frames() {
        let mut acc = 0.0f32;
        for ch in 0..channels {
            let sample: f32 = buf.chan(ch)[frame].into_sample();
            acc += sample;
        }
        out.push(acc * scale);
    }
}
