//! Integration tests for eegdoc
//!
//! These tests drive the full pipeline: tabular text in, queries and overlays on
//! the document, binary persistence and text export back out.

use eegdoc::codec::{self, CodecConfig, CodecError};
use eegdoc::document::{DocumentContents, Stream};
use eegdoc::electrode::{resolve, Prefix};
use eegdoc::export::export_tabular;
use eegdoc::import::{import_document, import_document_from_path, import_streams, ImportError};
use eegdoc::overlay::{document_overlays, epoch_end_proportion, event_proportion};
use eegdoc::query::sample_points;
use std::fmt::Write as _;
use std::fs;
use tempfile::tempdir;

/// Tabular text for a montage, with full-precision samples
fn tabular_recording(symbols: &[&str], samples: usize) -> String {
    let mut text = symbols.join(",");
    text.push('\n');
    for i in 0..samples {
        let t = i as f64 / 500.0;
        let row: Vec<String> = (0..symbols.len())
            .map(|ch| format!("{}", 25.0 * (t * 11.0 + ch as f64).sin() - 3.0 * (t * 3.0).cos()))
            .collect();
        writeln!(text, "{}", row.join(",")).unwrap();
    }
    text
}

#[test]
fn test_two_channel_scenario() {
    let streams = import_streams("Fp1,Fp2\n1.0,2.0\n3.0,-4.0\n").unwrap();
    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].electrode(), resolve("Fp1").unwrap());
    assert_eq!(streams[1].electrode(), resolve("Fp2").unwrap());
    assert_eq!(streams[0].samples(), &[1.0, 3.0]);
    assert_eq!(streams[1].samples(), &[2.0, -4.0]);
}

#[test]
fn test_resolver_equivalence() {
    let canonical = resolve("Fp1").unwrap();
    assert_eq!(resolve("fp1").unwrap(), canonical);
    assert_eq!(resolve(" FP1 ").unwrap(), canonical);
    assert!(resolve("XQ9").is_err());
}

#[test]
fn test_duration_scenario() {
    let text = tabular_recording(&["Cz"], 500);
    let doc = import_document(&text, 100.0).unwrap();
    assert_eq!(doc.sample_count(), Some(500));
    assert_eq!(doc.duration(), Some(5.0));
    assert_eq!(doc.time(250), 2.5);
    assert_eq!(doc.time(0), 0.0);
}

#[test]
fn test_event_at_last_sample() {
    assert_eq!(event_proportion(100, 99), Some(1.0));
}

#[test]
fn test_import_shape_matches_text() {
    let symbols = ["Fp1", "Fp2", "F3", "F4", "C3", "C4", "P3", "P4", "O1", "O2", "Fz", "Cz"];
    let text = tabular_recording(&symbols, 1500);
    let doc = import_document(&text, 500.0).unwrap();

    assert_eq!(doc.streams().len(), symbols.len());
    assert_eq!(doc.sample_count(), Some(1500));
    let order: Vec<String> = doc.streams().iter().map(|s| s.electrode().symbol()).collect();
    assert_eq!(order, symbols);
    assert_eq!(
        doc.prefixes(),
        vec![Prefix::Fp, Prefix::F, Prefix::C, Prefix::P, Prefix::O]
    );
}

#[test]
fn test_full_pipeline() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("session.csv");
    let doc_path = dir.path().join("session.eegd");

    let symbols = ["Fp1", "Fp2", "C3", "C4", "O1", "O2", "Oz", "Pz"];
    let text = tabular_recording(&symbols, 5000);
    fs::write(&csv_path, &text).unwrap();

    // Import and annotate
    let mut doc = import_document_from_path(&csv_path, 500.0).unwrap();
    doc.set_subject(Some("S12".to_string()));
    doc.set_info(Some("auditory oddball".to_string()));
    doc.set_epoch_length(Some(250)).unwrap();
    for index in (0..5000).step_by(1000) {
        doc.insert_event("standard", index + 100).unwrap();
    }
    doc.insert_event("deviant", 2600).unwrap();

    // Query a window for display
    let visible: Vec<&Stream> = doc
        .sorted_streams()
        .into_iter()
        .filter(|s| s.electrode().prefix() == Prefix::O)
        .collect();
    let points = sample_points(visible, doc.sample_rate(), Some(4900..6000));
    assert_eq!(points.len(), 3 * 100);
    assert_eq!(points[0].electrode.symbol(), "O1");
    assert_eq!(points[0].timestamp, doc.time(4900));
    assert_eq!(points[299].electrode.symbol(), "Oz");
    assert_eq!(points[299].potential, doc.streams()[6].samples()[4999]);

    // Overlays for the active event types
    let overlays = document_overlays(&doc, &["deviant"], true);
    assert_eq!(overlays.len(), 1);
    assert_eq!(overlays[0].event_proportion, 2601.0 / 5000.0);
    assert_eq!(
        overlays[0].epoch_end_proportion,
        epoch_end_proportion(5000, 2600, 250)
    );

    // Persist, smaller than the text it came from
    codec::write_document(&doc_path, &doc, &CodecConfig::default()).unwrap();
    let stored = fs::metadata(&doc_path).unwrap().len() as usize;
    assert!(stored < text.len(), "{} >= {}", stored, text.len());

    // Restore exactly
    let restored = codec::read_document(&doc_path).unwrap();
    assert_eq!(restored, doc);
    assert_eq!(restored.summary(), doc.summary());

    // Text export reproduces the original samples
    let exported = export_tabular(&restored).unwrap();
    let reimported = import_streams(&exported).unwrap();
    for (original, again) in doc.streams().iter().zip(&reimported) {
        assert_eq!(original.electrode(), again.electrode());
        assert_eq!(original.samples(), again.samples());
    }
}

#[test]
fn test_quantized_storage_pipeline() {
    let text = tabular_recording(&["F7", "F8", "T7", "T8"], 4000);
    let doc = import_document(&text, 250.0).unwrap();

    let exact = codec::encode(&doc).unwrap();
    let quantized = codec::encode_with(&doc, &CodecConfig::max_compression().quantized(3)).unwrap();
    assert!(quantized.len() < exact.len());
    assert!(exact.len() < text.len());

    let restored = codec::decode(&quantized).unwrap();
    for (original, decoded) in doc.streams().iter().zip(restored.streams()) {
        let worst = original
            .samples()
            .iter()
            .zip(decoded.samples())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        assert!(worst <= 0.5e-3 + 1e-9, "worst error {}", worst);
    }
}

#[test]
fn test_failed_import_leaves_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    fs::write(&path, "Fp1,Fp2\n1,2\n3,oops\n5,6\n").unwrap();

    match import_document_from_path(&path, 250.0) {
        Err(ImportError::MalformedSample { row, column }) => {
            assert_eq!((row, column), (3, 2));
        }
        other => panic!("unexpected result: {:?}", other.map(|d| d.summary())),
    }
}

#[test]
fn test_decode_rejects_text_input() {
    let text = tabular_recording(&["Cz"], 10);
    assert!(matches!(
        codec::decode(text.as_bytes()),
        Err(CodecError::CorruptedData(_))
    ));
}

#[test]
fn test_documents_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DocumentContents>();

    let text = tabular_recording(&["C3", "C4"], 1000);
    let doc = import_document(&text, 250.0).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let doc = &doc;
                scope.spawn(move || {
                    sample_points(doc.streams(), doc.sample_rate(), Some(n * 200..n * 200 + 100))
                        .len()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 200);
        }
    });
}
