//! User-facing terminal output.

pub mod progress;
