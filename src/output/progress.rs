//! Progress reporting for batch runs.

use indicatif::{ProgressBar, ProgressStyle};

/// Bar shown while a batch of recordings is analyzed.
///
/// Returns a hidden bar when progress is disabled or there is nothing
/// to count, so callers can drive it unconditionally.
pub fn batch_progress(total: usize, enabled: bool) -> ProgressBar {
    if !enabled || total == 0 {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "[{elapsed_precise}] {bar:40.green/white} {pos}/{len} recordings ({eta})",
    ) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
