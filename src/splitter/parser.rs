//! Tracklist parsing.
//!
//! A tracklist is plain text with one `<MM:SS> <track name>` entry per line.
//! Lines that do not split into a timestamp and a name are ignored, and
//! timestamps are not validated here.

use std::path::Path;

use tracing::{debug, trace};

use crate::Error;
use crate::constants::UTF8_BOM;

/// One tracklist line: the start timestamp and the track name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEntry {
    /// Start time as written in the tracklist (`MM:SS`).
    pub timestamp: String,
    /// Free-text track name.
    pub name: String,
}

/// Read and parse a tracklist file.
///
/// The file is decoded as UTF-8 first. If that fails it is decoded as
/// ISO-8859-1, which accepts every byte sequence.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_tracklist(path: &Path) -> Result<Vec<TrackEntry>, Error> {
    let bytes = std::fs::read(path).map_err(|e| Error::TracklistRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(parse_tracklist(&decode_text(&bytes)))
}

/// Decode tracklist bytes, falling back to ISO-8859-1 on invalid UTF-8.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            debug!("Tracklist is not valid UTF-8 ({e}), decoding as ISO-8859-1");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}

/// Parse tracklist text into entries, preserving line order.
pub fn parse_tracklist(text: &str) -> Vec<TrackEntry> {
    text.lines()
        .enumerate()
        .filter_map(|(line_num, line)| {
            let entry = parse_line(line);
            if entry.is_none() && !line.trim().is_empty() {
                trace!("Ignoring tracklist line {}: {line:?}", line_num + 1);
            }
            entry
        })
        .collect()
}

/// Split a line on its first run of whitespace.
fn parse_line(line: &str) -> Option<TrackEntry> {
    let (timestamp, rest) = line.trim().split_once(char::is_whitespace)?;
    let name = rest.trim_start();
    if timestamp.is_empty() || name.is_empty() {
        return None;
    }

    Some(TrackEntry {
        timestamp: timestamp.to_string(),
        name: name.to_string(),
    })
}
