use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use eegdoc::codec::Profile;

mod config;
mod demo;
mod export;
mod import;
mod info;

/// eegdoc - EEG recording import, inspection and compact storage
#[derive(Parser)]
#[command(name = "eegdoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Encoding profile for optimizing speed vs size.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over size
    Fast,
    /// Balance between speed and size
    #[default]
    Balanced,
    /// Smallest files, slower encoding
    MaxCompression,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Import a tabular text recording into an .eegd document
    Import {
        /// Input text file (header of electrode symbols, one sample row per line)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output document path (defaults to INPUT with an .eegd extension)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Sample rate in Hz (required unless set in the config file)
        #[arg(short = 's', long)]
        sample_rate: Option<f64>,

        /// Subject description
        #[arg(long)]
        subject: Option<String>,

        /// Free-text recording info
        #[arg(long)]
        info: Option<String>,

        /// Epoch length in samples
        #[arg(short = 'e', long)]
        epoch_length: Option<usize>,

        /// Encoding profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,

        /// Store samples rounded to this many decimals instead of exactly
        #[arg(short = 'd', long)]
        decimals: Option<u8>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        // === Advanced tuning flags (hidden from --help) ===
        /// zlib compression level (0-9, default: profile-dependent)
        #[arg(short = 'c', long, hide = true)]
        compression_level: Option<u32>,
    },

    /// Export an .eegd document back to tabular text
    Export {
        /// Input document path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output text file (defaults to standard output)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Display information about an .eegd document or a tabular text file
    Info {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Sample rate in Hz, used when FILE is tabular text
        #[arg(short = 's', long, default_value_t = 256.0)]
        sample_rate: f64,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a synthetic recording for testing
    Demo {
        /// Output document path
        #[arg(value_name = "OUTPUT", default_value = "demo_recording.eegd")]
        output: PathBuf,

        /// Recording length in seconds
        #[arg(long, default_value_t = 10)]
        seconds: usize,

        /// Encoding profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Import {
            input,
            output,
            sample_rate,
            subject,
            info,
            epoch_length,
            profile,
            decimals,
            config,
            compression_level,
        } => import::run(import::ImportArgs {
            input,
            output,
            sample_rate,
            subject,
            info,
            epoch_length,
            profile: Profile::from(profile),
            decimals,
            config,
            compression_level,
        }),
        Commands::Export { input, output } => export::run(input, output),
        Commands::Info {
            file,
            sample_rate,
            json,
        } => info::run(file, sample_rate, json),
        Commands::Demo {
            output,
            seconds,
            profile,
        } => demo::run(output, seconds, Profile::from(profile)),
    }
}
