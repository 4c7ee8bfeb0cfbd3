//! Audio decoding, resampling, and writing.

mod decode;
mod resample;
mod wav;

pub use decode::{Recording, decode_audio_file};
pub use resample::{change_speed, resample};
pub use wav::write_wav;
