use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use eegdoc::codec::read_document;
use eegdoc::export::export_tabular_to_writer;

/// Export an .eegd document to tabular text
pub fn run(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let doc = read_document(&input)
        .with_context(|| format!("Failed to read document {}", input.display()))?;

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export_tabular_to_writer(&doc, BufWriter::new(file)).context("Export failed")?;
            info!("Exported {} to {}", doc.summary(), path.display());
        }
        None => {
            export_tabular_to_writer(&doc, io::stdout().lock()).context("Export failed")?;
        }
    }

    Ok(())
}
