use super::*;
use crate::electrode::resolve;
use std::io::Write;

#[test]
fn test_import_two_channels() {
    let streams = import_streams("Fp1,Fp2\n1.0,2.0\n3.0,-4.0\n").unwrap();

    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].electrode(), resolve("Fp1").unwrap());
    assert_eq!(streams[1].electrode(), resolve("Fp2").unwrap());
    assert_eq!(streams[0].samples(), &[1.0, 3.0]);
    assert_eq!(streams[1].samples(), &[2.0, -4.0]);
    assert_ne!(streams[0].id(), streams[1].id());
}

#[test]
fn test_stream_order_follows_header() {
    let streams = import_streams("O2,Cz,Fp1\n1,2,3\n").unwrap();
    let symbols: Vec<String> = streams.iter().map(|s| s.electrode().symbol()).collect();
    assert_eq!(symbols, vec!["O2", "Cz", "Fp1"]);
}

#[test]
fn test_blank_lines_ignored() {
    let text = "\n\nC3, C4\n\n1.5,2.5\n   \n3.5,4.5\n\n";
    let streams = import_streams(text).unwrap();
    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].samples(), &[1.5, 3.5]);
    assert_eq!(streams[1].samples(), &[2.5, 4.5]);
}

#[test]
fn test_windows_line_endings() {
    let streams = import_streams("Fz,Pz\r\n1,2\r\n3,4\r\n").unwrap();
    assert_eq!(streams[0].samples(), &[1.0, 3.0]);
    assert_eq!(streams[1].samples(), &[2.0, 4.0]);
}

#[test]
fn test_stray_characters_stripped() {
    let text = "Fp1,Fp2\n\"12.5\",  -3.25 uV\n 7 ,+8\n";
    let streams = import_streams(text).unwrap();
    assert_eq!(streams[0].samples(), &[12.5, 7.0]);
    assert_eq!(streams[1].samples(), &[-3.25, 8.0]);
}

#[test]
fn test_header_is_resolved_case_insensitively() {
    let streams = import_streams(" fp1 ,CZ\n0,0\n").unwrap();
    assert_eq!(streams[0].electrode().symbol(), "Fp1");
    assert_eq!(streams[1].electrode().symbol(), "Cz");
}

#[test]
fn test_unrecognized_electrode_aborts() {
    let err = import_streams("Fp1,XQ9\n1,2\n").unwrap_err();
    match err {
        ImportError::UnrecognizedElectrode(symbol) => assert_eq!(symbol, "XQ9"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_sample_reports_position() {
    let err = import_streams("Fp1,Fp2\n1.0,2.0\n3.0,abc\n").unwrap_err();
    assert!(matches!(err, ImportError::MalformedSample { row: 3, column: 2 }));

    let err = import_streams("Fp1\n1.2.3\n").unwrap_err();
    assert!(matches!(err, ImportError::MalformedSample { row: 2, column: 1 }));

    let err = import_streams("Fp1,Fp2\n,1\n").unwrap_err();
    assert!(matches!(err, ImportError::MalformedSample { row: 2, column: 1 }));
}

#[test]
fn test_short_and_long_rows_rejected() {
    let err = import_streams("Fp1,Fp2,Cz\n1,2,3\n4,5\n").unwrap_err();
    assert!(matches!(
        err,
        ImportError::RowColumnMismatch {
            row: 3,
            expected: 3,
            found: 2
        }
    ));

    let err = import_streams("Fp1,Fp2\n1,2,3\n").unwrap_err();
    assert!(matches!(
        err,
        ImportError::RowColumnMismatch {
            expected: 2,
            found: 3,
            ..
        }
    ));
}

#[test]
fn test_empty_input_yields_no_streams() {
    assert!(import_streams("").unwrap().is_empty());
    assert!(import_streams("\n \n").unwrap().is_empty());
}

#[test]
fn test_header_only_yields_empty_streams() {
    let streams = import_streams("Fp1,Fp2\n").unwrap();
    assert_eq!(streams.len(), 2);
    assert!(streams.iter().all(Stream::is_empty));
}

#[test]
fn test_quoted_commas_are_not_escapes() {
    // Quotes are literal; the comma still splits the field
    let err = import_streams("Fp1\n\"1,5\"\n").unwrap_err();
    assert!(matches!(err, ImportError::RowColumnMismatch { found: 2, .. }));
}

#[test]
fn test_import_document() {
    let doc = import_document("Fp1,Fp2\n1,2\n3,4\n5,6\n", 4.0).unwrap();
    assert_eq!(doc.sample_count(), Some(3));
    assert_eq!(doc.duration(), Some(0.75));

    let err = import_document("Fp1\n1\n", 0.0).unwrap_err();
    assert!(matches!(err, ImportError::DocumentError(_)));
}

#[test]
fn test_import_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recording.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "Fp1,Fp2,Cz").unwrap();
    for i in 0..100 {
        writeln!(file, "{},{},{}", i, -i, i * 2).unwrap();
    }
    drop(file);

    let streams = import_streams_from_path(&path).unwrap();
    assert_eq!(streams.len(), 3);
    assert!(streams.iter().all(|s| s.len() == 100));
    assert_eq!(streams[2].samples()[99], 198.0);

    assert!(matches!(
        import_streams_from_path(dir.path().join("missing.csv")),
        Err(ImportError::IoError(_))
    ));
}
