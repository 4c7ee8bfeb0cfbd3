//! Detection pipeline for one recording.

use crate::audio::{change_speed, decode_audio_file, write_wav};
use crate::config::{DetectionMode, OutputFormat};
use crate::detect::{detect_runs, energy_envelope, merge_runs, quantile_threshold};
use crate::error::Result;
use crate::filters::{apply_noise_filter, normalize_peak, trim_silence};
use crate::markers::zero_outside_markers;
use crate::output::{
    AnalysisContext, AudacityWriter, CsvWriter, JsonReportWriter, ReportWriter, Utterance,
};
use crate::pipeline::{AnalyzeOptions, output_path_for, processed_path_for};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Figures from analyzing one recording.
#[derive(Debug)]
pub struct AnalysisResult {
    /// Number of utterances found.
    pub utterances: usize,
    /// Detection threshold derived from the envelope.
    pub threshold: f32,
    /// Processing duration in seconds.
    pub duration_secs: f64,
    /// Audio duration in seconds.
    pub audio_duration_secs: f64,
}

/// Analyze a single recording and write utterance results.
///
/// Decodes the recording, applies the configured waveform conditioning,
/// detects utterance intervals on the smoothed energy envelope, and
/// writes one output file per requested format.
pub fn analyze_file(
    input_path: &Path,
    output_dir: &Path,
    options: &AnalyzeOptions,
) -> Result<AnalysisResult> {
    let start_time = Instant::now();

    info!("Processing: {}", input_path.display());

    let recording = decode_audio_file(input_path)?;
    let audio_duration_secs = recording.duration_secs();
    let sample_rate = recording.sample_rate;
    info!(
        "Decoded {audio_duration_secs:.1}s of audio at {sample_rate} Hz ({} samples)",
        recording.samples.len()
    );

    let samples = condition_waveform(recording.samples, sample_rate, options)?;

    debug!(
        "Computing energy envelope (window {} samples)...",
        options.smooth_window
    );
    let envelope = energy_envelope(&samples, options.smooth_window);
    let threshold = quantile_threshold(&envelope, options.quantile);
    debug!(
        "Detection threshold {threshold:.6} at quantile {}",
        options.quantile
    );

    let runs = detect_runs(&envelope, threshold);
    debug!("Found {} raw active runs", runs.len());

    let intervals = merge_runs(&runs, sample_rate, options.merge_gap, options.mode.policy())?;
    let utterances = Utterance::from_intervals(&intervals, options.mode == DetectionMode::Grid);

    info!(
        "Found {} utterance(s) above threshold {threshold:.6}",
        utterances.len()
    );
    for utterance in &utterances {
        debug!("  {}: {:.3}s - {:.3}s", utterance.label(), utterance.start, utterance.end);
    }

    let context = AnalysisContext {
        source_file: input_path.display().to_string(),
        audio_duration: audio_duration_secs,
        threshold,
        smooth_window: options.smooth_window,
        quantile: options.quantile,
        merge_gap: options.merge_gap,
        mode: options.mode.to_string(),
        speed: options.speed,
        denoise: options.denoise,
        normalize: options.normalize,
        trim: options.trim,
        marker_file: options.marker_file.clone(),
    };

    for format in &options.formats {
        write_report(input_path, output_dir, *format, &utterances, &context)?;
    }

    if options.save_processed {
        let wav_path = processed_path_for(input_path, output_dir);
        debug!("Saving processed waveform: {}", wav_path.display());
        write_wav(&wav_path, &samples, sample_rate)?;
    }

    let duration_secs = start_time.elapsed().as_secs_f64();
    info!("Processed {} in {duration_secs:.2}s", input_path.display());

    Ok(AnalysisResult {
        utterances: utterances.len(),
        threshold,
        duration_secs,
        audio_duration_secs,
    })
}

/// Apply the enabled conditioning steps in their fixed order.
///
/// Order is noise filter, peak normalization, marker zeroing, silence
/// trim, speed change. Trimming runs after zeroing so the kept zones
/// stay aligned with the marker times.
fn condition_waveform(
    mut samples: Vec<f32>,
    sample_rate: u32,
    options: &AnalyzeOptions,
) -> Result<Vec<f32>> {
    if options.denoise {
        debug!(
            "Applying noise filter (background q{}, peak q{})...",
            options.background_quantile, options.peak_quantile
        );
        samples = apply_noise_filter(&samples, options.background_quantile, options.peak_quantile);
    }

    if options.normalize {
        debug!("Normalizing peak amplitude...");
        samples = normalize_peak(&samples);
    }

    if let Some(markers) = &options.markers {
        debug!(
            "Zeroing waveform outside marker zones ({} marker times, buffer {}s)...",
            markers.len(),
            options.marker_buffer
        );
        samples = zero_outside_markers(&samples, sample_rate, markers, options.marker_buffer);
    }

    if options.trim {
        let (trimmed, (start, end)) = trim_silence(&samples, options.trim_top_db);
        debug!("Trimmed silence, keeping samples {start}..{end}");
        samples = trimmed;
    }

    if (options.speed - 1.0).abs() > f64::EPSILON {
        debug!("Stretching playback by factor {}...", options.speed);
        samples = change_speed(&samples, sample_rate, options.speed)?;
    }

    Ok(samples)
}

/// Write utterances to an output file.
fn write_report(
    input_path: &Path,
    output_dir: &Path,
    format: OutputFormat,
    utterances: &[Utterance],
    context: &AnalysisContext,
) -> Result<()> {
    let output_path = output_path_for(input_path, output_dir, format);
    debug!("Writing {format} results to {}", output_path.display());

    let mut writer: Box<dyn ReportWriter> = match format {
        OutputFormat::Csv => Box::new(CsvWriter::new(&output_path, input_path)?),
        OutputFormat::Audacity => Box::new(AudacityWriter::new(&output_path)?),
        OutputFormat::Json => Box::new(JsonReportWriter::new(&output_path, context.clone())),
    };

    writer.begin()?;
    for utterance in utterances {
        writer.write_utterance(utterance)?;
    }
    writer.finish()?;

    Ok(())
}
