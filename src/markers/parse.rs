//! Marker file parsing.
//!
//! Marker files are plain text with one stimulus time per line, in
//! seconds from the start of the recording. Extra tab-separated columns
//! (labels exported by annotation tools) are ignored, as are blank
//! lines and lines starting with `#`.

use std::path::Path;

use crate::error::{Error, Result};

/// Read stimulus marker times from a file.
///
/// Times must be finite, non-negative, and strictly ascending. A file
/// with no marker times at all is rejected.
pub fn read_marker_file(path: &Path) -> Result<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|e| Error::MarkerFileRead {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut markers = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = result.map_err(|e| Error::InvalidMarkerFile {
            message: format!("line {}: {e}", line_num + 1),
        })?;

        let Some(field) = record.get(0) else {
            continue;
        };
        if field.is_empty() {
            continue;
        }

        let time: f64 = field.parse().map_err(|_| Error::InvalidMarkerFile {
            message: format!("line {}: '{field}' is not a number", line_num + 1),
        })?;

        if !time.is_finite() || time < 0.0 {
            return Err(Error::InvalidMarkerFile {
                message: format!(
                    "line {}: marker time {time} must be finite and non-negative",
                    line_num + 1
                ),
            });
        }
        if let Some(&prev) = markers.last()
            && time <= prev
        {
            return Err(Error::InvalidMarkerFile {
                message: format!(
                    "line {}: marker times must be strictly ascending ({time} follows {prev})",
                    line_num + 1
                ),
            });
        }
        markers.push(time);
    }

    if markers.is_empty() {
        return Err(Error::InvalidMarkerFile {
            message: "no marker times found".to_string(),
        });
    }
    Ok(markers)
}
