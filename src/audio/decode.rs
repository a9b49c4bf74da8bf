//! Audio decoding using symphonia.

use crate::error::{Error, Result};
use crate::splitter::TimeRangeMs;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Fully decoded audio, kept as planar 16-bit PCM.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    channels: Vec<Vec<i16>>,
    sample_rate: u32,
}

/// A borrowed time range of [`DecodedAudio`].
#[derive(Debug, Clone)]
pub struct AudioSlice<'a> {
    /// Samples per channel, all of equal length.
    pub channels: Vec<&'a [i16]>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioSlice<'_> {
    /// Number of frames in the slice.
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, |c| c.len())
    }
}

impl DecodedAudio {
    /// Build decoded audio from planar channel data.
    ///
    /// Channels are truncated to the shortest one so every channel has the
    /// same frame count.
    pub fn new(mut channels: Vec<Vec<i16>>, sample_rate: u32) -> Self {
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        for channel in &mut channels {
            channel.truncate(frames);
        }
        Self {
            channels,
            sample_rate,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Total duration in whole milliseconds.
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        let millis = self.frames() as u128 * 1000 / u128::from(self.sample_rate);
        u64::try_from(millis).unwrap_or(u64::MAX)
    }

    /// Frame index at a millisecond offset, clamped to the audio length.
    pub fn frame_at_ms(&self, ms: u64) -> usize {
        let frame = u128::from(ms) * u128::from(self.sample_rate) / 1000;
        usize::try_from(frame).unwrap_or(usize::MAX).min(self.frames())
    }

    /// Borrow the audio in `[start_ms, end_ms)`.
    ///
    /// Offsets past the end are clamped; an inverted range yields an empty slice.
    pub fn slice(&self, range: TimeRangeMs) -> AudioSlice<'_> {
        let end = self.frame_at_ms(range.end_ms);
        let start = self.frame_at_ms(range.start_ms).min(end);
        AudioSlice {
            channels: self.channels.iter().map(|c| &c[start..end]).collect(),
            sample_rate: self.sample_rate,
        }
    }
}

/// Decode an audio file fully into memory.
///
/// Supports MP3 as well as WAV, FLAC and AAC. Corrupt packets are skipped
/// with a warning.
pub fn decode_audio_file(path: &Path) -> Result<DecodedAudio> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut channels: Vec<Vec<i16>> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<i16>> = None;
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(symphonia::core::errors::Error::DecodeError(reason)) => {
                skipped_packets += 1;
                debug!("Skipping corrupt packet: {reason}");
                continue;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        let frames = decoded.frames();
        if frames == 0 {
            continue;
        }
        let spec = *decoded.spec();
        let channel_count = spec.channels.count();
        if channels.is_empty() {
            channels = vec![Vec::new(); channel_count];
        }

        let required = decoded.capacity() * channel_count;
        if sample_buf.as_ref().is_none_or(|b| b.capacity() < required) {
            sample_buf = None;
        }
        let buf = sample_buf
            .get_or_insert_with(|| SampleBuffer::new(decoded.capacity() as u64, spec));
        buf.copy_planar_ref(decoded);

        for (channel, samples) in channels.iter_mut().zip(buf.samples().chunks(frames)) {
            channel.extend_from_slice(samples);
        }
    }

    if skipped_packets > 0 {
        warn!(
            "Skipped {skipped_packets} corrupt packet(s) while decoding {}",
            path.display()
        );
    }

    let audio = DecodedAudio::new(channels, sample_rate);
    debug!(
        "Decoded {} frames, {} channel(s) at {} Hz",
        audio.frames(),
        audio.channel_count(),
        audio.sample_rate()
    );

    Ok(audio)
}
