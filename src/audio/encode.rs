//! MP3 encoding using LAME.

use crate::audio::AudioSlice;
use crate::constants::encoder::{FLUSH_BUFFER_SIZE, FRAMES_PER_CHUNK};
use crate::error::{Error, Result};
use mp3lame_encoder::{Bitrate, Builder, DualPcm, Encoder, FlushNoGap, MonoPcm, Quality};
use tracing::debug;

/// MP3 encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderSettings {
    /// Constant bitrate in kbps.
    pub bitrate_kbps: u32,
    /// LAME algorithm quality, 0 (best) to 9 (worst).
    pub quality: u8,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            bitrate_kbps: crate::constants::DEFAULT_BITRATE_KBPS,
            quality: crate::constants::DEFAULT_QUALITY,
        }
    }
}

/// Encode a slice of audio to a complete MP3 byte stream.
///
/// Mono input is encoded as mono, anything wider as stereo from the first two
/// channels.
pub fn encode_mp3(slice: &AudioSlice<'_>, settings: EncoderSettings) -> Result<Vec<u8>> {
    let (left, right) = match slice.channels.as_slice() {
        [] => {
            return Err(Error::Mp3Encode {
                reason: "audio has no channels".to_string(),
            });
        }
        [mono] => (*mono, None),
        [left, right, rest @ ..] => {
            if !rest.is_empty() {
                debug!("Dropping {} channel(s) beyond stereo", rest.len());
            }
            (*left, Some(*right))
        }
    };

    let mut encoder = build_encoder(slice.sample_rate, right.is_some(), settings)?;
    let frames = slice.frames();
    let mut output = Vec::with_capacity(mp3lame_encoder::max_required_buffer_size(frames));

    let mut offset = 0;
    while offset < frames {
        let end = (offset + FRAMES_PER_CHUNK).min(frames);
        output.reserve(mp3lame_encoder::max_required_buffer_size(end - offset));
        let written = match right {
            Some(right) => encoder.encode_to_vec(
                DualPcm {
                    left: &left[offset..end],
                    right: &right[offset..end],
                },
                &mut output,
            ),
            None => encoder.encode_to_vec(MonoPcm(&left[offset..end]), &mut output),
        }
        .map_err(|e| Error::Mp3Encode {
            reason: format!("{e:?}"),
        })?;
        debug!("Encoded frames {offset}..{end} into {written} bytes");
        offset = end;
    }

    output.reserve(FLUSH_BUFFER_SIZE);
    encoder
        .flush_to_vec::<FlushNoGap>(&mut output)
        .map_err(|e| Error::Mp3Encode {
            reason: format!("{e:?}"),
        })?;

    Ok(output)
}

fn build_encoder(sample_rate: u32, stereo: bool, settings: EncoderSettings) -> Result<Encoder> {
    let build_err = |e: mp3lame_encoder::BuildError| Error::Mp3Encode {
        reason: format!("{e:?}"),
    };

    let mut builder = Builder::new().ok_or_else(|| Error::Mp3Encode {
        reason: "failed to allocate LAME encoder".to_string(),
    })?;
    builder
        .set_num_channels(if stereo { 2 } else { 1 })
        .map_err(build_err)?;
    builder.set_sample_rate(sample_rate).map_err(build_err)?;
    builder
        .set_brate(lame_bitrate(settings.bitrate_kbps)?)
        .map_err(build_err)?;
    builder
        .set_quality(lame_quality(settings.quality)?)
        .map_err(build_err)?;
    builder.build().map_err(build_err)
}

/// Map a kbps value to one of LAME's constant bitrates.
fn lame_bitrate(kbps: u32) -> Result<Bitrate> {
    let bitrate = match kbps {
        8 => Bitrate::Kbps8,
        16 => Bitrate::Kbps16,
        24 => Bitrate::Kbps24,
        32 => Bitrate::Kbps32,
        40 => Bitrate::Kbps40,
        48 => Bitrate::Kbps48,
        64 => Bitrate::Kbps64,
        80 => Bitrate::Kbps80,
        96 => Bitrate::Kbps96,
        112 => Bitrate::Kbps112,
        128 => Bitrate::Kbps128,
        160 => Bitrate::Kbps160,
        192 => Bitrate::Kbps192,
        224 => Bitrate::Kbps224,
        256 => Bitrate::Kbps256,
        320 => Bitrate::Kbps320,
        other => {
            return Err(Error::Mp3Encode {
                reason: format!("unsupported bitrate: {other} kbps"),
            });
        }
    };
    Ok(bitrate)
}

fn lame_quality(quality: u8) -> Result<Quality> {
    let quality = match quality {
        0 => Quality::Best,
        1 => Quality::SecondBest,
        2 => Quality::NearBest,
        3 => Quality::VeryNice,
        4 => Quality::Nice,
        5 => Quality::Good,
        6 => Quality::Decent,
        7 => Quality::Ok,
        8 => Quality::SecondWorst,
        9 => Quality::Worst,
        other => {
            return Err(Error::Mp3Encode {
                reason: format!("quality must be between 0 and 9, got {other}"),
            });
        }
    };
    Ok(quality)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::audio::DecodedAudio;
    use crate::constants::encoder::SUPPORTED_BITRATES;
    use crate::splitter::TimeRangeMs;

    fn tone(frames: usize) -> Vec<i16> {
        (0..frames)
            .map(|i| {
                #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
                let sample = ((i as f32 * 0.05).sin() * 8000.0) as i16;
                sample
            })
            .collect()
    }

    #[test]
    fn test_every_supported_bitrate_maps() {
        for &kbps in SUPPORTED_BITRATES {
            assert!(lame_bitrate(kbps).is_ok(), "{kbps} kbps");
        }
        assert!(lame_bitrate(100).is_err());
    }

    #[test]
    fn test_quality_bounds() {
        assert!(lame_quality(0).is_ok());
        assert!(lame_quality(9).is_ok());
        assert!(lame_quality(10).is_err());
    }

    #[test]
    fn test_encode_stereo_produces_frames() {
        let audio = DecodedAudio::new(vec![tone(44_100), tone(44_100)], 44_100);
        let bytes = encode_mp3(
            &audio.slice(TimeRangeMs::new(0, 1000)),
            EncoderSettings::default(),
        )
        .unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_encode_mono() {
        let audio = DecodedAudio::new(vec![tone(22_050)], 22_050);
        let bytes = encode_mp3(
            &audio.slice(TimeRangeMs::new(0, 500)),
            EncoderSettings {
                bitrate_kbps: 64,
                quality: 7,
            },
        )
        .unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_encode_rejects_channelless_audio() {
        let audio = DecodedAudio::new(Vec::new(), 44_100);
        let result = encode_mp3(
            &audio.slice(TimeRangeMs::new(0, 1000)),
            EncoderSettings::default(),
        );
        assert!(matches!(result, Err(Error::Mp3Encode { .. })));
    }
}
