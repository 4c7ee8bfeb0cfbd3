//! Output format writers.

mod audacity;
mod csv;
mod json;
pub mod progress;
mod report;
mod types;

pub use audacity::AudacityWriter;
pub use csv::CsvWriter;
pub use json::{AnalysisContext, JsonReportWriter};
pub use report::ReportWriter;
pub use types::{TrialSlot, Utterance};
