//! JSON report writer.
//!
//! The JSON report captures the detected utterances together with the
//! settings that produced them, so a session can be re-analyzed or
//! compared later without the original command line.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::output::{ReportWriter, Utterance};

/// Analysis parameters and source facts recorded in the report.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    /// File name of the recording under analysis.
    pub source_file: String,
    /// Duration of the analyzed audio in seconds.
    pub audio_duration: f64,
    /// Detection threshold derived from the envelope.
    pub threshold: f32,
    /// Envelope smoothing window in samples.
    pub smooth_window: usize,
    /// Threshold quantile.
    pub quantile: f64,
    /// Merge gap in seconds.
    pub merge_gap: f64,
    /// Detection mode name.
    pub mode: String,
    /// Speed factor applied before analysis.
    pub speed: f64,
    /// Whether the noise filter ran.
    pub denoise: bool,
    /// Whether peak normalization ran.
    pub normalize: bool,
    /// Whether silence trimming ran.
    pub trim: bool,
    /// Marker file used for stimulus zeroing, if any.
    pub marker_file: Option<String>,
}

/// Top-level shape of the report document.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportBody {
    /// Name of the recording this report describes.
    pub source_file: String,
    /// Report generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Settings the detection ran with.
    pub settings: SettingsBlock,
    /// Detected utterances.
    pub utterances: Vec<UtteranceRow>,
    /// Aggregate figures for the session.
    pub summary: SummaryBlock,
}

/// Detection settings echoed into the report.
#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsBlock {
    /// Envelope smoothing window in samples.
    pub smooth_window: usize,
    /// Threshold quantile.
    pub quantile: f64,
    /// Merge gap in seconds.
    pub merge_gap: f64,
    /// Detection mode.
    pub mode: String,
    /// Speed factor.
    pub speed: f64,
    /// Whether the noise filter ran.
    pub denoise: bool,
    /// Whether peak normalization ran.
    pub normalize: bool,
    /// Whether silence trimming ran.
    pub trim: bool,
    /// Marker file used for stimulus zeroing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_file: Option<String>,
}

/// Single utterance in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct UtteranceRow {
    /// One-based position within the recording.
    pub index: usize,
    /// Utterance onset in seconds.
    pub start_time: f64,
    /// Utterance offset in seconds.
    pub end_time: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Trial number (grid mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial: Option<usize>,
    /// Repetition within the trial (grid mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition: Option<usize>,
}

/// Aggregate counts and totals for one session.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryBlock {
    /// Total number of utterances.
    pub total_utterances: usize,
    /// Summed duration of all utterances in seconds.
    pub total_speech_seconds: f64,
    /// Detection threshold derived from the envelope.
    pub detection_threshold: f32,
    /// Length of the analyzed recording in seconds.
    pub audio_duration_seconds: f64,
}

/// Writer for JSON report files.
pub struct JsonReportWriter {
    utterances: Vec<Utterance>,
    output_path: PathBuf,
    context: AnalysisContext,
}

impl JsonReportWriter {
    /// Create a new JSON report writer.
    pub fn new(output_path: &Path, context: AnalysisContext) -> Self {
        Self {
            utterances: Vec::new(),
            output_path: output_path.to_path_buf(),
            context,
        }
    }

    fn summarize(&self) -> SummaryBlock {
        SummaryBlock {
            total_utterances: self.utterances.len(),
            total_speech_seconds: self.utterances.iter().map(Utterance::duration).sum(),
            detection_threshold: self.context.threshold,
            audio_duration_seconds: self.context.audio_duration,
        }
    }
}

impl ReportWriter for JsonReportWriter {
    fn begin(&mut self) -> Result<()> {
        // The whole report is rendered in finish.
        Ok(())
    }

    fn write_utterance(&mut self, utterance: &Utterance) -> Result<()> {
        self.utterances.push(utterance.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let utterances: Vec<UtteranceRow> = self
            .utterances
            .iter()
            .map(|u| UtteranceRow {
                index: u.ordinal,
                start_time: u.start,
                end_time: u.end,
                duration: u.duration(),
                trial: u.slot.map(|s| s.trial),
                repetition: u.slot.map(|s| s.repetition),
            })
            .collect();

        let report = ReportBody {
            source_file: self.context.source_file.clone(),
            generated_at: Utc::now(),
            settings: SettingsBlock {
                smooth_window: self.context.smooth_window,
                quantile: self.context.quantile,
                merge_gap: self.context.merge_gap,
                mode: self.context.mode.clone(),
                speed: self.context.speed,
                denoise: self.context.denoise,
                normalize: self.context.normalize,
                trim: self.context.trim,
                marker_file: self.context.marker_file.clone(),
            },
            utterances,
            summary: self.summarize(),
        };

        let out = BufWriter::new(File::create(&self.output_path)?);
        serde_json::to_writer_pretty(out, &report).map_err(|e| Error::JsonWrite {
            path: self.output_path.clone(),
            source: e,
        })?;

        Ok(())
    }
}
