//! # eegdoc
//!
//! A command-line tool for importing, inspecting and storing EEG recordings.
//!
//! ## Usage
//!
//! ```bash
//! # Import a tabular text export recorded at 256 Hz
//! eegdoc import recording.csv recording.eegd --sample-rate 256
//!
//! # Show what a document contains
//! eegdoc info recording.eegd
//!
//! # Turn it back into text
//! eegdoc export recording.eegd recording.csv
//!
//! # Generate a synthetic recording
//! eegdoc demo demo_recording.eegd
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
