use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use eegdoc::codec::{self, CodecConfig, Profile};
use eegdoc::document::DocumentContents;
use eegdoc::import::import_streams_from_path;

use super::config::Config;

/// Flags of the import command, before config file values are merged in
pub struct ImportArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub sample_rate: Option<f64>,
    pub subject: Option<String>,
    pub info: Option<String>,
    pub epoch_length: Option<usize>,
    pub profile: Profile,
    pub decimals: Option<u8>,
    pub config: Option<PathBuf>,
    pub compression_level: Option<u32>,
}

/// Import a tabular text recording into an .eegd document
pub fn run(args: ImportArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    let sample_rate = args
        .sample_rate
        .or(config.import.sample_rate)
        .context("No sample rate given; pass --sample-rate or set [import] sample_rate")?;
    let subject = args.subject.or(config.import.subject);
    let recording_info = args.info.or(config.import.info);
    let epoch_length = args.epoch_length.or(config.import.epoch_length);

    let mut codec_config = CodecConfig::from_profile(args.profile);
    if let Some(level) = args.compression_level.or(config.codec.compression_level) {
        codec_config.compression_level = level;
    }
    if let Some(decimals) = args.decimals.or(config.codec.decimals) {
        codec_config = codec_config.quantized(decimals);
    }

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension(codec::EXTENSION));

    info!("eegdoc import");
    info!("=============");
    info!("Input:  {}", args.input.display());
    info!("Output: {}", output.display());
    info!("Sample rate: {} Hz", sample_rate);
    info!("Profile: {}", args.profile);
    info!("Compression level: {}", codec_config.compression_level);
    if let Some(decimals) = args.decimals.or(config.codec.decimals) {
        info!("Sample precision: {} decimals", decimals);
    }

    let streams = import_streams_from_path(&args.input)
        .with_context(|| format!("Failed to import {}", args.input.display()))?;

    let mut builder = DocumentContents::builder(sample_rate).streams(streams);
    if let Some(subject) = subject {
        builder = builder.subject(subject);
    }
    if let Some(recording_info) = recording_info {
        builder = builder.info(recording_info);
    }
    if let Some(epoch_length) = epoch_length {
        builder = builder.epoch_length(epoch_length);
    }
    let doc = builder.build().context("Imported data is not a valid recording")?;

    codec::write_document(&output, &doc, &codec_config).context("Failed to write document")?;

    let input_size = std::fs::metadata(&args.input).map(|m| m.len()).unwrap_or(0);
    let output_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);

    info!("Import complete!");
    info!("  {}", doc.summary());
    info!(
        "  Output file size: {} bytes ({:.2} MB)",
        output_size,
        output_size as f64 / 1024.0 / 1024.0
    );
    if output_size > 0 {
        info!(
            "  Size relative to text: {:.1}x smaller",
            input_size as f64 / output_size as f64
        );
    }

    Ok(())
}
