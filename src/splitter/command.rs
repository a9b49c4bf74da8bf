//! Split command execution.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::Error;
use crate::audio::{EncoderSettings, decode_audio_file};
use crate::output::progress::{create_track_progress, format_duration, report};

use super::{
    BoundaryPolicy, ExclusionPrompt, Mp3Writer, SegmentPlan, WrittenTrack, plan_segments,
    read_tracklist, timestamp_to_ms,
};

/// Everything needed to split one recording.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Source audio file.
    pub input: PathBuf,
    /// Tracklist text file.
    pub tracklist: PathBuf,
    /// Directory receiving the track files.
    pub output: PathBuf,
    /// MP3 encoder settings.
    pub encoder: EncoderSettings,
    /// Segment start policy.
    pub boundary: BoundaryPolicy,
    /// Print the plan instead of writing files.
    pub dry_run: bool,
    /// Show a progress bar while writing.
    pub progress: bool,
}

/// Outcome of a split run.
#[derive(Debug, Clone, Default)]
pub struct SplitSummary {
    /// Every planned segment, excluded ones included.
    pub plan: Vec<SegmentPlan>,
    /// Files written, in tracklist order.
    pub written: Vec<WrittenTrack>,
    /// Number of excluded tracks.
    pub skipped: usize,
}

/// Execute the split.
///
/// Per-track confirmations go to stdout while the progress bar is hidden.
/// When the bar is drawn they are printed above it through the bar's own
/// draw target, which is stderr.
///
/// Timestamps are validated before the operator is asked for exclusions and
/// before the audio is decoded, so a malformed tracklist fails without
/// writing anything.
///
/// # Errors
///
/// Returns an error if the tracklist is empty or malformed, the audio cannot
/// be decoded, or a track cannot be encoded or written.
#[allow(clippy::print_stdout)]
pub fn execute(
    options: &SplitOptions,
    prompt: &mut dyn ExclusionPrompt,
) -> Result<SplitSummary, Error> {
    if !options.input.is_file() {
        return Err(Error::InputNotFound {
            path: options.input.clone(),
        });
    }

    let entries = read_tracklist(&options.tracklist)?;
    if entries.is_empty() {
        return Err(Error::EmptyTracklist {
            path: options.tracklist.clone(),
        });
    }
    for entry in &entries {
        timestamp_to_ms(&entry.timestamp)?;
    }
    info!(
        "Read {} tracks from {}",
        entries.len(),
        options.tracklist.display()
    );

    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    let ignore = prompt.ask_exclusions(&names)?;
    debug!("Excluded track indices: {ignore:?}");

    info!("Decoding {}...", options.input.display());
    let audio = decode_audio_file(&options.input)?;
    let total_ms = audio.duration_ms();
    info!(
        "Decoded {} of audio at {} Hz",
        format_duration(total_ms),
        audio.sample_rate()
    );

    let plan = plan_segments(&entries, total_ms, &ignore, options.boundary)?;
    let writer = Mp3Writer::new(options.output.clone(), options.encoder, entries.len());
    let skipped = plan.iter().filter(|p| !p.included).count();

    if options.dry_run {
        print_plan(&plan, &writer);
        return Ok(SplitSummary {
            plan,
            written: Vec::new(),
            skipped,
        });
    }

    writer.prepare()?;

    let pb = create_track_progress(plan.len() - skipped, options.progress);
    let mut written = Vec::new();

    for segment in &plan {
        if !segment.included {
            report(&pb, &format!("Skipping {}.", segment.name));
            continue;
        }

        pb.set_message(segment.name.clone());
        debug!(
            "Track {}: {}-{} ms",
            segment.ordinal, segment.range.start_ms, segment.range.end_ms
        );

        let track = writer.write_track(&audio, segment)?;
        report(&pb, &format!("Saved {}", track.file_name));
        written.push(track);
        pb.inc(1);
    }

    pb.finish_and_clear();
    println!("Splitting complete.");
    info!(
        "Wrote {} tracks ({skipped} skipped) to {}",
        written.len(),
        options.output.display()
    );

    Ok(SplitSummary {
        plan,
        written,
        skipped,
    })
}

#[allow(clippy::print_stdout)]
fn print_plan(plan: &[SegmentPlan], writer: &Mp3Writer) {
    for segment in plan {
        let marker = if segment.included { "" } else { " (skipped)" };
        println!(
            "{} {}-{}{marker}",
            writer.file_name_for(segment),
            format_duration(segment.range.start_ms),
            format_duration(segment.range.end_ms),
        );
    }
}
