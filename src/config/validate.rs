//! Configuration validation.

use crate::config::Config;
use crate::constants::encoder::{MAX_QUALITY, SUPPORTED_BITRATES};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    let defaults = &config.defaults;

    if !SUPPORTED_BITRATES.contains(&defaults.bitrate) {
        return Err(Error::ConfigValidation {
            message: format!(
                "bitrate must be one of {SUPPORTED_BITRATES:?} kbps, got {}",
                defaults.bitrate
            ),
        });
    }

    if defaults.quality > MAX_QUALITY {
        return Err(Error::ConfigValidation {
            message: format!(
                "quality must be between 0 and {MAX_QUALITY}, got {}",
                defaults.quality
            ),
        });
    }

    Ok(())
}
