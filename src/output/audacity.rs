//! Audacity label-track writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::constants::TIME_DECIMAL_PLACES;
use crate::error::Result;
use crate::output::{ReportWriter, Utterance};

/// Writes utterances as an Audacity label track.
///
/// The labels import straight into an Audacity label track, which makes
/// auditing detected intervals against the recording quick.
pub struct AudacityWriter {
    out: BufWriter<File>,
}

impl AudacityWriter {
    /// Create a writer targeting `path`.
    pub fn new(path: &Path) -> Result<Self> {
        let out = BufWriter::new(File::create(path)?);
        Ok(Self { out })
    }
}

impl ReportWriter for AudacityWriter {
    fn begin(&mut self) -> Result<()> {
        // Label tracks are headerless.
        Ok(())
    }

    fn write_utterance(&mut self, utterance: &Utterance) -> Result<()> {
        writeln!(
            self.out,
            "{:.places$}\t{:.places$}\t{}",
            utterance.start,
            utterance.end,
            utterance.label(),
            places = TIME_DECIMAL_PLACES,
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(self.out.flush()?)
    }
}
