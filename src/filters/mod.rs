//! Waveform conditioning filters applied before detection.

mod noise;
mod normalize;
mod trim;

pub use noise::apply_noise_filter;
pub use normalize::normalize_peak;
pub use trim::trim_silence;
