//! CSV result writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::constants::TIME_DECIMAL_PLACES;
use crate::error::Result;
use crate::output::{ReportWriter, Utterance};

/// Writes utterances as one CSV row each.
///
/// Each row repeats the source file name so rows from several sessions
/// can be concatenated into one sheet without losing provenance.
pub struct CsvWriter {
    out: BufWriter<File>,
    source_file: PathBuf,
}

impl CsvWriter {
    /// Create a writer at `path` for utterances of `source_file`.
    pub fn new(path: &Path, source_file: &Path) -> Result<Self> {
        let out = BufWriter::new(File::create(path)?);
        Ok(Self {
            out,
            source_file: source_file.to_path_buf(),
        })
    }
}

impl ReportWriter for CsvWriter {
    fn begin(&mut self) -> Result<()> {
        writeln!(self.out, "Index,Start (s),End (s),Duration (s),Label,File")?;
        Ok(())
    }

    fn write_utterance(&mut self, utterance: &Utterance) -> Result<()> {
        writeln!(
            self.out,
            "{},{:.places$},{:.places$},{:.places$},{},{}",
            utterance.ordinal,
            utterance.start,
            utterance.end,
            utterance.duration(),
            escape_csv(&utterance.label()),
            escape_csv(&self.source_file.display().to_string()),
            places = TIME_DECIMAL_PLACES,
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(self.out.flush()?)
    }
}

/// Quote a field when it holds a delimiter, quote, or newline.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detect::TimeInterval;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_header_and_row() {
        let tmp = NamedTempFile::new().unwrap();
        let mut writer = CsvWriter::new(tmp.path(), Path::new("session.wav")).unwrap();

        writer.begin().unwrap();
        let utterances = Utterance::from_intervals(
            &[TimeInterval {
                start: 1.25,
                end: 3.75,
            }],
            false,
        );
        writer.write_utterance(&utterances[0]).unwrap();
        writer.finish().unwrap();

        let contents = std::fs::read_to_string(tmp.path()).unwrap();
        assert!(contents.contains("Index,Start (s),End (s),Duration (s),Label,File"));
        assert!(contents.contains("1,1.250,3.750,2.500,utterance 1,session.wav"));
    }

    #[test]
    fn test_csv_writer_grid_labels() {
        let tmp = NamedTempFile::new().unwrap();
        let mut writer = CsvWriter::new(tmp.path(), Path::new("session.wav")).unwrap();

        writer.begin().unwrap();
        let intervals: Vec<TimeInterval> = (0..30)
            .map(|i| TimeInterval {
                start: f64::from(i) * 10.0,
                end: f64::from(i) * 10.0 + 2.0,
            })
            .collect();
        for utterance in Utterance::from_intervals(&intervals, true) {
            writer.write_utterance(&utterance).unwrap();
        }
        writer.finish().unwrap();

        let contents = std::fs::read_to_string(tmp.path()).unwrap();
        assert!(contents.contains("trial 1 rep 1"));
        assert!(contents.contains("trial 5 rep 6"));
    }

    #[test]
    fn test_field_quoting() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"go\""), "\"say \"\"go\"\"\"");
        assert_eq!(escape_csv("two\nlines"), "\"two\nlines\"");
    }
}
