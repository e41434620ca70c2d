use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use eegdoc::codec::{decode, is_encoded_document};
use eegdoc::document::{DocumentContents, DocumentSummary};
use eegdoc::import::import_document_from_path;

/// Display information about an .eegd document or a tabular text file
pub fn run(file: PathBuf, sample_rate: f64, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let bytes = std::fs::read(&file).context("Failed to read file")?;
    let (doc, format) = if is_encoded_document(&bytes) {
        let doc = decode(&bytes).context("Failed to decode document")?;
        (doc, "eegdoc binary")
    } else {
        let doc = import_document_from_path(&file, sample_rate)
            .context("Failed to import tabular text")?;
        (doc, "tabular text")
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&doc.summary())?);
        return Ok(());
    }

    print!("{}", format_report(&file, format, bytes.len(), &doc));
    Ok(())
}

fn format_report(file: &Path, format: &str, size: usize, doc: &DocumentContents) -> String {
    let summary = doc.summary();
    let electrodes: Vec<String> = doc
        .sorted_streams()
        .iter()
        .map(|s| s.electrode().symbol())
        .collect();

    #[cfg(feature = "colorized_output")]
    {
        use console::style;

        let mut output = String::new();
        output.push_str(&format!("{}\n", style("eegdoc File Information").bold().cyan()));
        output.push_str(&format!("{}\n", style("=======================").cyan()));
        output.push_str(&format!("{}: {}\n", style("File").bold(), file.display()));
        output.push_str(&format!("{}: {} ({} bytes)\n\n", style("Format").bold(), format, size));
        output.push_str(&summary_lines(&summary, &electrodes));
        output
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        let mut output = String::new();
        output.push_str("eegdoc File Information\n");
        output.push_str("=======================\n");
        output.push_str(&format!("File: {}\n", file.display()));
        output.push_str(&format!("Format: {} ({} bytes)\n\n", format, size));
        output.push_str(&summary_lines(&summary, &electrodes));
        output
    }
}

fn summary_lines(summary: &DocumentSummary, electrodes: &[String]) -> String {
    let mut lines = String::new();
    lines.push_str(&format!("Document: {}\n", summary.id));
    if let Some(subject) = &summary.subject {
        lines.push_str(&format!("Subject: {}\n", subject));
    }
    lines.push_str(&format!("Recording: {}\n", summary));
    if let Some(range) = summary.potential_range {
        lines.push_str(&format!("Potential range: {} .. {}\n", range.min, range.max));
    }
    if let Some(epoch_length) = summary.epoch_length {
        lines.push_str(&format!("Epoch length: {} samples\n", epoch_length));
    }
    lines.push_str(&format!("Electrodes: {}\n", electrodes.join(", ")));
    if !summary.event_counts.is_empty() {
        lines.push_str("Events:\n");
        for (event_type, count) in &summary.event_counts {
            lines.push_str(&format!("  {}: {}\n", event_type, count));
        }
    }
    lines
}
