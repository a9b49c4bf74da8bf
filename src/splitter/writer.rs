//! MP3 track writing.
//!
//! Writes each planned segment to `{NN} - {name}.mp3` in the output directory.

use std::fs;
use std::path::PathBuf;

use crate::Error;
use crate::audio::{DecodedAudio, EncoderSettings, encode_mp3};
use crate::constants::naming::{
    REPLACEMENT_CHAR, RESERVED_CHARS, TRACK_EXTENSION, TWO_DIGIT_LIMIT,
};

use super::SegmentPlan;

/// A track file that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTrack {
    /// One-based track number.
    pub ordinal: usize,
    /// File name inside the output directory.
    pub file_name: String,
    /// Full path of the written file.
    pub path: PathBuf,
}

/// Writes planned segments as MP3 files.
pub struct Mp3Writer {
    /// Output directory for tracks.
    output_dir: PathBuf,
    /// Encoder configuration shared by all tracks.
    settings: EncoderSettings,
    /// Digits used for track numbers.
    number_width: usize,
}

impl Mp3Writer {
    /// Create a writer for a tracklist of `track_count` entries.
    #[must_use]
    pub fn new(output_dir: PathBuf, settings: EncoderSettings, track_count: usize) -> Self {
        Self {
            output_dir,
            settings,
            number_width: track_number_width(track_count),
        }
    }

    /// Create the output directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn prepare(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.output_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: self.output_dir.clone(),
            source: e,
        })
    }

    /// File name a planned segment will be written to.
    pub fn file_name_for(&self, plan: &SegmentPlan) -> String {
        output_filename(plan.ordinal, self.number_width, &plan.name)
    }

    /// Encode the segment's audio and write it, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the file cannot be written.
    pub fn write_track(
        &self,
        audio: &DecodedAudio,
        plan: &SegmentPlan,
    ) -> Result<WrittenTrack, Error> {
        let bytes = encode_mp3(&audio.slice(plan.range), self.settings)?;

        let file_name = self.file_name_for(plan);
        let path = self.output_dir.join(&file_name);
        fs::write(&path, bytes).map_err(|e| Error::TrackWrite {
            path: path.clone(),
            source: e,
        })?;

        Ok(WrittenTrack {
            ordinal: plan.ordinal,
            file_name,
            path,
        })
    }
}

/// Replace characters that are invalid in file names with `_`.
///
/// The replacement is one-for-one; nothing else is changed.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if RESERVED_CHARS.contains(&c) {
                REPLACEMENT_CHAR
            } else {
                c
            }
        })
        .collect()
}

/// Digits used for track numbers: 2 up to 99 tracks, 3 beyond.
pub fn track_number_width(track_count: usize) -> usize {
    if track_count <= TWO_DIGIT_LIMIT { 2 } else { 3 }
}

/// Build `{ordinal} - {sanitized name}.mp3` with a zero-padded ordinal.
pub fn output_filename(ordinal: usize, width: usize, name: &str) -> String {
    format!(
        "{ordinal:0width$} - {}.{TRACK_EXTENSION}",
        sanitize_filename(name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Track Name A"), "Track Name A");
        assert_eq!(sanitize_filename("a/b:c*d"), "a_b_c_d");
        assert_eq!(sanitize_filename(r#"<>:"/\|?*"#), "_________");
    }

    #[test]
    fn test_sanitize_keeps_everything_else() {
        assert_eq!(sanitize_filename("Björk - Jóga (Live) [2001]"), "Björk - Jóga (Live) [2001]");
        assert_eq!(sanitize_filename(".."), "..");
    }

    #[test]
    fn test_track_number_width() {
        assert_eq!(track_number_width(1), 2);
        assert_eq!(track_number_width(99), 2);
        assert_eq!(track_number_width(100), 3);
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(output_filename(1, 2, "A"), "01 - A.mp3");
        assert_eq!(output_filename(7, 3, "What?"), "007 - What_.mp3");
        assert_eq!(output_filename(120, 3, "Last"), "120 - Last.mp3");
    }
}
