//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "tracksplit";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default MP3 bitrate in kbps.
pub const DEFAULT_BITRATE_KBPS: u32 = 192;

/// Default LAME algorithm quality (0 = best, 9 = worst).
pub const DEFAULT_QUALITY: u8 = 2;

/// UTF-8 Byte Order Mark, stripped from the start of tracklists.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

/// Encoder constants.
pub mod encoder {
    /// Constant bitrates accepted by LAME, in kbps.
    pub const SUPPORTED_BITRATES: &[u32] = &[
        8, 16, 24, 32, 40, 48, 64, 80, 96, 112, 128, 160, 192, 224, 256, 320,
    ];

    /// Worst (highest) LAME quality value.
    pub const MAX_QUALITY: u8 = 9;

    /// Frames handed to LAME per encode call.
    pub const FRAMES_PER_CHUNK: usize = 1152 * 64;

    /// Output space LAME requires for a final flush.
    pub const FLUSH_BUFFER_SIZE: usize = 7200;
}

/// Output file naming constants.
pub mod naming {
    /// Extension of written track files.
    pub const TRACK_EXTENSION: &str = "mp3";

    /// Characters that cannot appear in a file name on common platforms.
    pub const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

    /// Replacement for each reserved character.
    pub const REPLACEMENT_CHAR: char = '_';

    /// Largest track count that still uses two-digit ordinals.
    pub const TWO_DIGIT_LIMIT: usize = 99;
}

/// Interactive prompt text.
pub mod prompt {
    /// Header printed before the numbered track listing.
    pub const LISTING_HEADER: &str = "Here is a list of all track names:";

    /// Question asked after the listing.
    pub const QUESTION: &str = "Enter the numbers of tracks to ignore (comma separated, e.g., 2,5,8 or ranges like 3-6), or press Enter to skip: ";
}
