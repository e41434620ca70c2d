use anyhow::{Context, Result};
use log::info;
use std::f64::consts::TAU;
use std::path::PathBuf;

use eegdoc::codec::{self, CodecConfig, Profile};
use eegdoc::document::{DocumentContents, Stream};
use eegdoc::electrode::{resolve, Prefix};

/// The 19 electrodes of the standard 10-20 montage
const MONTAGE: [&str; 19] = [
    "Fp1", "Fp2", "F7", "F3", "Fz", "F4", "F8", "T7", "C3", "Cz", "C4", "T8", "P7", "P3", "Pz",
    "P4", "P8", "O1", "O2",
];

const SAMPLE_RATE: f64 = 256.0;

/// Generate a synthetic resting-state recording
pub fn run(output: PathBuf, seconds: usize, profile: Profile) -> Result<()> {
    info!("eegdoc - Demo Recording");
    info!("=======================");

    let doc = generate_demo_recording(seconds)?;
    info!("Generated {}", doc.summary());

    codec::write_document(&output, &doc, &CodecConfig::from_profile(profile))
        .context("Failed to write demo document")?;

    let file_size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    let raw_size = doc.streams().len() * doc.sample_count().unwrap_or(0) * 8;
    info!("  Output file: {}", output.display());
    info!(
        "  File size: {} bytes ({:.2} MB)",
        file_size,
        file_size as f64 / 1024.0 / 1024.0
    );
    if file_size > 0 {
        info!(
            "  Compression ratio vs raw f64: {:.1}x",
            raw_size as f64 / file_size as f64
        );
    }

    info!("\nInspect it with:");
    info!("  eegdoc info {}", output.display());
    info!("  eegdoc export {} recording.csv", output.display());

    Ok(())
}

/// Alpha rhythm over occipital and parietal sites, eye blinks over the frontal
/// poles, and a stimulus every two seconds with a half-second epoch.
fn generate_demo_recording(seconds: usize) -> Result<DocumentContents> {
    let sample_count = seconds * SAMPLE_RATE as usize;
    let mut noise = Lcg(0x5EED);

    let mut streams = Vec::with_capacity(MONTAGE.len());
    for (channel, symbol) in MONTAGE.iter().enumerate() {
        let electrode = resolve(symbol)?;
        let alpha_gain = match electrode.prefix() {
            Prefix::O => 30.0,
            Prefix::P => 18.0,
            Prefix::C => 8.0,
            _ => 4.0,
        };
        let blinks = electrode.prefix() == Prefix::Fp;
        let phase = channel as f64 * 0.3;

        let samples = (0..sample_count)
            .map(|i| {
                let t = i as f64 / SAMPLE_RATE;
                let alpha = alpha_gain * (TAU * 10.0 * t + phase).sin();
                let theta = 6.0 * (TAU * 6.0 * t + 2.0 * phase).sin();
                let blink = if blinks { blink_at(t) } else { 0.0 };
                let value = alpha + theta + blink + noise.next_centered() * 5.0;
                (value * 1000.0).round() / 1000.0
            })
            .collect();
        streams.push(Stream::new(electrode, samples));
    }

    let mut builder = DocumentContents::builder(SAMPLE_RATE)
        .subject("demo subject")
        .info("synthetic resting state, eyes closed")
        .streams(streams)
        .epoch_length(SAMPLE_RATE as usize / 2);
    let stimulus_every = 2 * SAMPLE_RATE as usize;
    for index in (stimulus_every / 2..sample_count).step_by(stimulus_every) {
        builder = builder.event("stimulus", index);
    }
    for index in (3 * SAMPLE_RATE as usize..sample_count).step_by(5 * SAMPLE_RATE as usize) {
        builder = builder.event("blink", index);
    }

    Ok(builder.build()?)
}

/// Blink artifact: a 300 ms bump every five seconds, starting at 3 s
fn blink_at(t: f64) -> f64 {
    let offset = (t - 3.0).rem_euclid(5.0);
    if t >= 3.0 && offset < 0.3 {
        120.0 * (std::f64::consts::PI * offset / 0.3).sin()
    } else {
        0.0
    }
}

/// Small deterministic generator so demo files are reproducible
struct Lcg(u64);

impl Lcg {
    fn next_centered(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64 - 0.5
    }
}
