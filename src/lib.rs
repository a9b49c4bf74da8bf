//! Tracksplit - split a continuous recording into tracks from a tracklist.
//!
//! The pipeline reads a `MM:SS Track Name` tracklist, asks which tracks to
//! leave out, decodes the source audio and writes one MP3 file per track.

#![warn(missing_docs)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod splitter;

use clap::Parser;
use cli::{Cli, Command, SplitArgs};
use config::{Config, config_file_path, load_default_config, save_default_config};
use splitter::command::SplitOptions;
use splitter::{ExclusionPrompt, InteractivePrompt, PresetExclusions};
use tracing::debug;

pub use error::{Error, Result};

/// Main entry point for the tracksplit CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.split.verbose, cli.split.quiet);

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let config = load_default_config()?;
    let options = split_options(&cli.split, &config)?;
    debug!("Split options: {options:?}");

    let mut prompt = exclusion_prompt(&cli.split);
    splitter::command::execute(&options, prompt.as_mut())?;

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).init();
}

/// Merge command-line flags over the configuration file.
fn split_options(args: &SplitArgs, config: &Config) -> Result<SplitOptions> {
    // Guaranteed by clap when no subcommand is given
    let required = |value: &Option<std::path::PathBuf>, flag: &str| {
        value.clone().ok_or_else(|| Error::Internal {
            message: format!("missing required argument {flag}"),
        })
    };

    let defaults = &config.defaults;
    Ok(SplitOptions {
        input: required(&args.input, "--input")?,
        tracklist: required(&args.tracklist, "--tracklist")?,
        output: required(&args.output, "--output")?,
        encoder: audio::EncoderSettings {
            bitrate_kbps: args.bitrate.unwrap_or(defaults.bitrate),
            quality: args.quality.unwrap_or(defaults.quality),
        },
        boundary: args.boundary.unwrap_or(defaults.boundary),
        dry_run: args.dry_run,
        progress: defaults.progress && !args.no_progress && !args.quiet,
    })
}

/// Pick where the exclusion set comes from.
fn exclusion_prompt(args: &SplitArgs) -> Box<dyn ExclusionPrompt> {
    match &args.exclude {
        Some(tokens) => Box::new(PresetExclusions::parse(tokens)),
        None if args.no_prompt => Box::new(PresetExclusions::default()),
        None => Box::new(InteractivePrompt::new(
            std::io::stdin().lock(),
            std::io::stdout(),
        )),
    }
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
    }
}

fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
