//! Shared interface for result writers.

use crate::error::Result;
use crate::output::Utterance;

/// Sink for detected utterances, one implementation per output format.
///
/// Callers invoke `begin` once, push rows, and call `finish` after the
/// last one; formats without leading content treat `begin` as a no-op.
pub trait ReportWriter {
    /// Write any leading content the format requires.
    fn begin(&mut self) -> Result<()>;

    /// Append one utterance row.
    fn write_utterance(&mut self, utterance: &Utterance) -> Result<()>;

    /// Flush buffered content and close out the file.
    fn finish(&mut self) -> Result<()>;
}
