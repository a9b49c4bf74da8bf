//! Track exclusion selection.
//!
//! Exclusions are written as comma-separated one-based track numbers or
//! inclusive ranges, e.g. `2,5,8` or `3-6`.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use tracing::warn;

use crate::constants::prompt;
use crate::error::Result;

/// Zero-based indices of tracks that should not be exported.
pub type IgnoreSet = BTreeSet<usize>;

/// Source of the exclusion set for a tracklist.
pub trait ExclusionPrompt {
    /// Return the zero-based indices to exclude, given the track names in order.
    fn ask_exclusions(&mut self, names: &[&str]) -> Result<IgnoreSet>;
}

/// Asks the operator on a line-oriented terminal.
pub struct InteractivePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractivePrompt<R, W> {
    /// Create a prompt reading answers from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ExclusionPrompt for InteractivePrompt<R, W> {
    fn ask_exclusions(&mut self, names: &[&str]) -> Result<IgnoreSet> {
        writeln!(self.output, "{}", prompt::LISTING_HEADER)?;
        for (number, name) in names.iter().enumerate() {
            writeln!(self.output, "{}: {name}", number + 1)?;
        }
        write!(self.output, "{}", prompt::QUESTION)?;
        self.output.flush()?;

        // End of input reads as an empty answer
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(parse_exclusions(&answer, names.len()).into_reported())
    }
}

/// Exclusions fixed up front, for non-interactive runs.
#[derive(Debug, Clone, Default)]
pub struct PresetExclusions {
    indices: IgnoreSet,
    tokens: Option<String>,
}

impl PresetExclusions {
    /// Use an already computed set.
    pub fn new(indices: IgnoreSet) -> Self {
        Self {
            indices,
            tokens: None,
        }
    }

    /// Exclusion tokens in the prompt syntax.
    ///
    /// Tokens are parsed once the tracklist length is known; rejected ones
    /// are reported at that point.
    pub fn parse(input: &str) -> Self {
        Self {
            indices: IgnoreSet::new(),
            tokens: Some(input.to_string()),
        }
    }
}

impl ExclusionPrompt for PresetExclusions {
    fn ask_exclusions(&mut self, names: &[&str]) -> Result<IgnoreSet> {
        let mut indices = self.indices.clone();
        if let Some(tokens) = &self.tokens {
            indices.extend(parse_exclusions(tokens, names.len()).into_reported());
        }
        Ok(indices)
    }
}

/// Why an exclusion token was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectedToken {
    /// A `start-end` token whose bounds are not integers.
    InvalidRange(String),
    /// A range whose start is after its end.
    ReversedRange(String),
    /// Neither a track number nor a range.
    Unrecognized(String),
}

impl std::fmt::Display for RejectedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange(token) => write!(f, "Invalid range format: {token}"),
            Self::ReversedRange(token) => {
                write!(f, "Range start is after its end, ignoring: {token}")
            }
            Self::Unrecognized(token) => write!(f, "Not a track number or range: {token}"),
        }
    }
}

/// Result of parsing an exclusion answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionParse {
    /// Accepted zero-based indices.
    pub indices: IgnoreSet,
    /// Tokens that were discarded, in input order.
    pub rejected: Vec<RejectedToken>,
}

impl ExclusionParse {
    /// Warn about every rejected token and keep the accepted indices.
    pub fn into_reported(self) -> IgnoreSet {
        for token in &self.rejected {
            warn!("{token}");
        }
        self.indices
    }
}

/// Parse a comma-separated exclusion answer for a tracklist of
/// `track_count` entries.
///
/// Out-of-range track numbers are kept; they simply never match a track.
/// Ranges are expanded only up to `track_count`, so a huge upper bound costs
/// nothing.
pub fn parse_exclusions(input: &str, track_count: usize) -> ExclusionParse {
    let mut parsed = ExclusionParse::default();

    for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some((start, end)) = token.split_once('-') {
            match (start.trim().parse::<usize>(), end.trim().parse::<usize>()) {
                (Ok(start), Ok(end)) if start <= end => {
                    parsed
                        .indices
                        .extend(start.saturating_sub(1)..end.min(track_count));
                }
                (Ok(_), Ok(_)) => parsed
                    .rejected
                    .push(RejectedToken::ReversedRange(token.to_string())),
                _ => parsed
                    .rejected
                    .push(RejectedToken::InvalidRange(token.to_string())),
            }
        } else {
            match token.parse::<usize>() {
                Ok(number) if number > 0 => {
                    parsed.indices.insert(number - 1);
                }
                _ => parsed
                    .rejected
                    .push(RejectedToken::Unrecognized(token.to_string())),
            }
        }
    }

    parsed
}
