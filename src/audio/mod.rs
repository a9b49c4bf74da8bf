//! Audio decoding and MP3 encoding.

mod decode;
mod encode;

pub use decode::{AudioSlice, DecodedAudio, decode_audio_file};
pub use encode::{EncoderSettings, encode_mp3};
