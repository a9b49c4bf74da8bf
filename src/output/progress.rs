//! Progress bar utilities for track export.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a progress bar over the tracks to export.
///
/// Returns a hidden bar when disabled or when there is nothing to export.
pub fn create_track_progress(total_tracks: usize, enabled: bool) -> ProgressBar {
    if !enabled || total_tracks == 0 {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total_tracks as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} tracks ({msg})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print a user-facing line without breaking the progress bar.
#[allow(clippy::print_stdout)]
pub fn report(pb: &ProgressBar, message: &str) {
    if pb.is_hidden() {
        println!("{message}");
    } else {
        pb.println(message);
    }
}

/// Format milliseconds as `M:SS` or `H:MM:SS`.
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(156_000), "2:36");
        assert_eq!(format_duration(360_999), "6:00");
        assert_eq!(format_duration(3_725_000), "1:02:05");
    }

    #[test]
    fn test_disabled_progress_is_hidden() {
        assert!(create_track_progress(10, false).is_hidden());
        assert!(create_track_progress(0, true).is_hidden());
    }
}
