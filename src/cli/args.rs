//! CLI argument definitions.

use crate::cli::validators::parse_bitrate;
use crate::splitter::BoundaryPolicy;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Split one continuous recording into named MP3 tracks using a tracklist.
#[derive(Debug, Parser)]
#[command(name = "tracksplit")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for splitting.
    #[command(flatten)]
    pub split: SplitArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for splitting a recording.
#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Source audio file (MP3).
    #[arg(short, long, required = true)]
    pub input: Option<PathBuf>,

    /// Tracklist file with one `MM:SS Track Name` entry per line.
    #[arg(short, long, required = true)]
    pub tracklist: Option<PathBuf>,

    /// Directory to save the split tracks (created if missing).
    #[arg(short, long, required = true)]
    pub output: Option<PathBuf>,

    /// Tracks to exclude without prompting (e.g. "2,5,8" or "3-6").
    #[arg(short = 'x', long, allow_hyphen_values = true)]
    pub exclude: Option<String>,

    /// Do not ask which tracks to exclude.
    #[arg(short = 'y', long)]
    pub no_prompt: bool,

    /// MP3 bitrate in kbps (8-320).
    #[arg(short, long, value_parser = parse_bitrate, env = "TRACKSPLIT_BITRATE")]
    pub bitrate: Option<u32>,

    /// LAME encoder quality (0 = best, 9 = fastest).
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9), env = "TRACKSPLIT_QUALITY")]
    pub quality: Option<u8>,

    /// Where each track starts.
    #[arg(long, value_enum, env = "TRACKSPLIT_BOUNDARY")]
    pub boundary: Option<BoundaryPolicy>,

    /// Print the planned tracks without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Disable the progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_required_args() {
        let cli =
            Cli::try_parse_from(["tracksplit", "-i", "mix.mp3", "-t", "list.txt", "-o", "out"])
                .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.split.input, Some(PathBuf::from("mix.mp3")));
        assert_eq!(cli.split.tracklist, Some(PathBuf::from("list.txt")));
        assert_eq!(cli.split.output, Some(PathBuf::from("out")));
        assert!(!cli.split.no_prompt);
    }

    #[test]
    fn test_cli_parse_long_names_and_options() {
        let cli = Cli::try_parse_from([
            "tracksplit",
            "--input",
            "mix.mp3",
            "--tracklist",
            "list.txt",
            "--output",
            "out",
            "--exclude",
            "2,4-5",
            "--bitrate",
            "320",
            "--quality",
            "0",
            "--boundary",
            "carry-forward",
            "--dry-run",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.split.exclude.as_deref(), Some("2,4-5"));
        assert_eq!(cli.split.bitrate, Some(320));
        assert_eq!(cli.split.quality, Some(0));
        assert_eq!(cli.split.boundary, Some(BoundaryPolicy::CarryForward));
        assert!(cli.split.dry_run);
        assert_eq!(cli.split.verbose, 2);
    }

    #[test]
    fn test_cli_requires_all_paths() {
        assert!(Cli::try_parse_from(["tracksplit", "-i", "mix.mp3", "-t", "list.txt"]).is_err());
        assert!(Cli::try_parse_from(["tracksplit"]).is_err());
    }

    #[test]
    fn test_cli_rejects_bad_quality() {
        let cli = Cli::try_parse_from([
            "tracksplit", "-i", "a.mp3", "-t", "b.txt", "-o", "c", "--quality", "10",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["tracksplit", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }
}
