//! Segment boundary computation.
//!
//! Boundaries are computed for the whole tracklist before any audio is
//! written. Each track ends where the next one starts, and the last track
//! ends at the end of the recording.

use serde::{Deserialize, Serialize};

use super::{IgnoreSet, TrackEntry};
use crate::Error;

/// A half-open time range `[start_ms, end_ms)`.
///
/// `start_ms <= end_ms` is not enforced; an inverted range slices to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRangeMs {
    /// Start offset in milliseconds.
    pub start_ms: u64,
    /// End offset in milliseconds (exclusive).
    pub end_ms: u64,
}

impl TimeRangeMs {
    /// Create a range.
    pub const fn new(start_ms: u64, end_ms: u64) -> Self {
        Self { start_ms, end_ms }
    }
}

/// How a segment's start boundary is chosen.
///
/// `TrackStart` reproduces the worked splitting examples, where every track
/// begins at its own timestamp. `CarryForward` reproduces the step-by-step
/// accumulator rule, where a track begins at the timestamp of the track before
/// it and that value advances past excluded tracks too.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryPolicy {
    /// Each segment starts at its own track's timestamp.
    #[default]
    TrackStart,
    /// Each segment starts at the previous track's timestamp, carried across
    /// excluded tracks as well.
    CarryForward,
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrackStart => write!(f, "track-start"),
            Self::CarryForward => write!(f, "carry-forward"),
        }
    }
}

/// One planned output track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPlan {
    /// Zero-based position in the tracklist.
    pub index: usize,
    /// One-based track number used in the file name.
    pub ordinal: usize,
    /// Track name as written in the tracklist.
    pub name: String,
    /// Portion of the source audio for this track.
    pub range: TimeRangeMs,
    /// False if the operator excluded the track.
    pub included: bool,
}

/// Convert an `MM:SS` timestamp to milliseconds.
///
/// Seconds are not limited to 59.
///
/// # Errors
///
/// Returns [`Error::TimestampFormat`] unless the token has exactly one `:`
/// with a non-negative integer on each side.
pub fn timestamp_to_ms(timestamp: &str) -> Result<u64, Error> {
    let invalid = |reason: &str| Error::TimestampFormat {
        timestamp: timestamp.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = timestamp.split(':');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid("expected MM:SS"));
    };

    let minutes: u64 = minutes
        .parse()
        .map_err(|_| invalid("minutes are not a number"))?;
    let seconds: u64 = seconds
        .parse()
        .map_err(|_| invalid("seconds are not a number"))?;

    minutes
        .checked_mul(60)
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .ok_or_else(|| invalid("timestamp is too large"))
}

/// Plan every segment of the tracklist.
///
/// # Errors
///
/// Returns [`Error::TimestampFormat`] for the first malformed timestamp; no
/// partial plan is returned.
pub fn plan_segments(
    entries: &[TrackEntry],
    total_ms: u64,
    ignore: &IgnoreSet,
    policy: BoundaryPolicy,
) -> Result<Vec<SegmentPlan>, Error> {
    let starts = entries
        .iter()
        .map(|entry| timestamp_to_ms(&entry.timestamp))
        .collect::<Result<Vec<_>, _>>()?;

    let mut previous_ms = 0;
    let mut plans = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let own_start = starts[index];
        let end_ms = starts.get(index + 1).copied().unwrap_or(total_ms);
        let start_ms = match policy {
            BoundaryPolicy::TrackStart => own_start,
            BoundaryPolicy::CarryForward => previous_ms,
        };

        plans.push(SegmentPlan {
            index,
            ordinal: index + 1,
            name: entry.name.clone(),
            range: TimeRangeMs::new(start_ms, end_ms),
            included: !ignore.contains(&index),
        });

        // Advances on excluded tracks too
        previous_ms = own_start;
    }

    Ok(plans)
}
