//! Configuration type definitions.

use crate::constants::{DEFAULT_BITRATE_KBPS, DEFAULT_QUALITY};
use crate::splitter::BoundaryPolicy;
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Default split settings, overridden by command-line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// MP3 bitrate in kbps.
    pub bitrate: u32,

    /// LAME algorithm quality (0 = best, 9 = worst).
    pub quality: u8,

    /// How segment start boundaries are chosen.
    pub boundary: BoundaryPolicy,

    /// Show a progress bar while writing tracks.
    pub progress: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            bitrate: DEFAULT_BITRATE_KBPS,
            quality: DEFAULT_QUALITY,
            boundary: BoundaryPolicy::default(),
            progress: true,
        }
    }
}
