//! Splitting a recording into tracks from a tracklist.
//!
//! This module parses the tracklist, collects the tracks to exclude, plans
//! segment boundaries and writes one MP3 file per remaining track.

pub mod command;
mod parser;
mod segmenter;
mod selector;
mod writer;

pub use parser::{TrackEntry, parse_tracklist, read_tracklist};
pub use segmenter::{BoundaryPolicy, SegmentPlan, TimeRangeMs, plan_segments, timestamp_to_ms};
pub use selector::{
    ExclusionParse, ExclusionPrompt, IgnoreSet, InteractivePrompt, PresetExclusions,
    RejectedToken, parse_exclusions,
};
pub use writer::{
    Mp3Writer, WrittenTrack, output_filename, sanitize_filename, track_number_width,
};
