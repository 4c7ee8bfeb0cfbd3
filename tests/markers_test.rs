//! Tests for marker files driving stimulus zone silencing.

use std::io::Write;
use tempfile::NamedTempFile;
use uttera::detect::{MergePolicy, detect_runs, energy_envelope, merge_runs, quantile_threshold};
use uttera::markers::{read_marker_file, zero_outside_markers};

/// Marker file in the annotation-tool export format.
fn marker_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn burst_signal(rate: u32, total_secs: f64, onsets: &[f64], burst_secs: f64) -> Vec<f32> {
    let total = (total_secs * f64::from(rate)) as usize;
    let mut samples = vec![0.0f32; total];
    for &onset in onsets {
        let start = (onset * f64::from(rate)) as usize;
        let end = (((onset + burst_secs) * f64::from(rate)) as usize).min(total);
        for (i, sample) in samples[start..end].iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let t = (start + i) as f64 / f64::from(rate);
            *sample = (2.0 * std::f64::consts::PI * 50.0 * t).sin() as f32;
        }
    }
    samples
}

#[test]
fn test_marker_file_roundtrip_through_zeroing() {
    let file = marker_file(&["# participant 7", "2.0\tstimulus", "5.0\tresponse window"]);
    let markers = read_marker_file(file.path()).unwrap();
    assert_eq!(markers, vec![2.0, 5.0]);

    // Only 2.0 is an anchor; its half-second zone is silenced.
    let samples = vec![1.0f32; 100];
    let out = zero_outside_markers(&samples, 10, &markers, 0.5);
    assert!(out[15..25].iter().all(|&v| v == 0.0));
    assert!(out[..15].iter().all(|&v| v == 1.0));
    assert!(out[25..].iter().all(|&v| v == 1.0));
}

#[test]
fn test_zeroed_stimulus_burst_is_not_detected() {
    // Two spoken bursts; the second coincides with stimulus playback.
    let samples = burst_signal(1000, 10.0, &[2.0, 7.0], 1.0);
    let file = marker_file(&["7.4\tstimulus playback"]);
    let markers = read_marker_file(file.path()).unwrap();

    let silenced = zero_outside_markers(&samples, 1000, &markers, 1.0);

    let envelope = energy_envelope(&silenced, 5);
    let threshold = quantile_threshold(&envelope, 0.5);
    let runs = detect_runs(&envelope, threshold);
    let intervals = merge_runs(&runs, 1000, 0.5, MergePolicy::Free).unwrap();

    assert_eq!(intervals.len(), 1);
    assert!((intervals[0].start - 2.0).abs() < 0.1);
    assert!((intervals[0].end - 3.0).abs() < 0.1);
}

#[test]
fn test_zeroing_preserves_waveform_length() {
    let samples = burst_signal(1000, 4.0, &[1.0], 0.5);
    let file = marker_file(&["1.2"]);
    let markers = read_marker_file(file.path()).unwrap();

    let out = zero_outside_markers(&samples, 1000, &markers, 0.3);
    assert_eq!(out.len(), samples.len());
}

#[test]
fn test_marker_file_blank_and_comment_lines() {
    let file = marker_file(&["# onset list", "", "1.25\tA", "", "# mid comment", "3.75\tB"]);
    let markers = read_marker_file(file.path()).unwrap();
    assert_eq!(markers, vec![1.25, 3.75]);
}

#[test]
fn test_marker_file_errors_surface() {
    let unordered = marker_file(&["5.0", "2.0"]);
    assert!(read_marker_file(unordered.path()).is_err());

    let garbage = marker_file(&["not-a-time\tlabel"]);
    assert!(read_marker_file(garbage.path()).is_err());

    let empty = marker_file(&["# only comments"]);
    assert!(read_marker_file(empty.path()).is_err());
}
