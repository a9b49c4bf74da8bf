//! CLI argument validators.

use crate::constants::encoder::SUPPORTED_BITRATES;

/// Parse and validate an MP3 bitrate in kbps.
pub fn parse_bitrate(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .trim_end_matches("kbps")
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !SUPPORTED_BITRATES.contains(&value) {
        let supported: Vec<String> = SUPPORTED_BITRATES.iter().map(u32::to_string).collect();
        return Err(format!(
            "bitrate must be one of {} kbps, got {value}",
            supported.join(", ")
        ));
    }

    Ok(value)
}
