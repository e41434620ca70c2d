use super::*;
use crate::electrode::{resolve, Electrode, Prefix, Suffix};
use crate::export::export_tabular;
use std::num::NonZeroU8;

const SYMBOLS: [&str; 8] = ["Fp1", "Fp2", "F3", "F4", "C3", "C4", "O1", "O2"];

fn recording(channels: usize, samples: usize) -> DocumentContents {
    let streams = SYMBOLS.iter().take(channels).enumerate().map(|(ch, symbol)| {
        let values = (0..samples)
            .map(|i| {
                let t = i as f64 / 256.0;
                40.0 * (t * 10.0 + ch as f64).sin() + 7.5 * (t * 47.0).cos()
            })
            .collect();
        Stream::new(resolve(symbol).unwrap(), values)
    });

    let mut builder = DocumentContents::builder(256.0)
        .subject("S01 ✓")
        .info("resting state")
        .streams(streams)
        .epoch_length(64);
    if samples > 40 {
        builder = builder
            .event("stimulus", 10)
            .event("stimulus", 40)
            .event("response", samples - 1);
    }
    builder.build().unwrap()
}

fn assert_corrupted(result: Result<DocumentContents, CodecError>) {
    match result {
        Err(CodecError::CorruptedData(_)) => {}
        Err(other) => panic!("expected CorruptedData, got {other}"),
        Ok(_) => panic!("expected CorruptedData, decoded a document"),
    }
}

#[test]
fn test_exact_roundtrip() {
    let doc = recording(8, 2048);
    let bytes = encode(&doc).unwrap();
    assert!(is_encoded_document(&bytes));

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded, doc);
    assert_eq!(decoded.id(), doc.id());
    assert_eq!(decoded.streams()[3].id(), doc.streams()[3].id());
    assert_eq!(decoded.subject(), Some("S01 ✓"));
    assert_eq!(decoded.epoch_length(), Some(64));
    assert!(decoded.events().contains("response", 2047));
}

#[test]
fn test_roundtrip_is_idempotent() {
    let doc = recording(4, 500);
    let first = encode(&doc).unwrap();
    let second = encode(&decode(&first).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_profile_roundtrips() {
    let doc = recording(3, 300);
    for profile in [Profile::Fast, Profile::Balanced, Profile::MaxCompression] {
        let bytes = encode_with(&doc, &CodecConfig::from_profile(profile)).unwrap();
        assert_eq!(decode(&bytes).unwrap(), doc);
    }
}

#[test]
fn test_empty_documents_roundtrip() {
    let empty = DocumentContents::new(500.0, Vec::new()).unwrap();
    assert_eq!(decode(&encode(&empty).unwrap()).unwrap(), empty);

    let no_samples =
        DocumentContents::new(500.0, vec![Stream::new(resolve("Cz").unwrap(), Vec::new())])
            .unwrap();
    let decoded = decode(&encode(&no_samples).unwrap()).unwrap();
    assert_eq!(decoded, no_samples);
    assert_eq!(decoded.sample_count(), Some(0));
}

#[test]
fn test_quantized_precision_bound() {
    let doc = recording(8, 1024);
    for decimals in [0u8, 2, 4, 6] {
        let config = CodecConfig::default().quantized(decimals);
        let decoded = decode(&encode_with(&doc, &config).unwrap()).unwrap();
        let bound = 0.5 * 10f64.powi(-i32::from(decimals)) + 1e-9;

        assert_eq!(decoded.id(), doc.id());
        assert_eq!(decoded.events(), doc.events());
        for (original, restored) in doc.streams().iter().zip(decoded.streams()) {
            assert_eq!(original.electrode(), restored.electrode());
            for (a, b) in original.samples().iter().zip(restored.samples()) {
                assert!((a - b).abs() <= bound, "{a} vs {b} at {decimals} decimals");
            }
        }
    }
}

#[test]
fn test_quantized_roundtrip_is_idempotent() {
    let config = CodecConfig::default().quantized(3);
    let once = decode(&encode_with(&recording(4, 400), &config).unwrap()).unwrap();
    let twice = decode(&encode_with(&once, &config).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_encoded_smaller_than_text() {
    let doc = recording(8, 4096);
    let text = export_tabular(&doc).unwrap();

    let exact = encode(&doc).unwrap();
    assert!(exact.len() < text.len(), "{} >= {}", exact.len(), text.len());

    let quantized = encode_with(&doc, &CodecConfig::default().quantized(2)).unwrap();
    assert!(quantized.len() < exact.len());
}

/// 19 channels of 2-decimal random walk on a DC offset, as amplifiers usually export
fn random_walk_recording(samples: usize) -> DocumentContents {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    let streams = (1..=19u8).map(|n| {
        let offset = 100.0 + 10.0 * f64::from(n);
        let mut level = offset;
        let values = (0..samples)
            .map(|_| {
                level = offset + 0.98 * (level - offset) + 4.0 * (next() - 0.5);
                (level * 100.0).round() / 100.0
            })
            .collect();
        let suffix = Suffix::Lateral(NonZeroU8::new(n).unwrap());
        Stream::new(Electrode::new(Prefix::ALL[usize::from(n) % 8], suffix), values)
    });
    DocumentContents::builder(500.0).streams(streams).build().unwrap()
}

#[test]
fn test_encoded_smaller_than_low_precision_text() {
    let doc = random_walk_recording(5000);
    let text = export_tabular(&doc).unwrap();

    let exact = encode(&doc).unwrap();
    assert!(exact.len() < text.len(), "{} >= {}", exact.len(), text.len());

    let quantized = encode_with(&doc, &CodecConfig::default().quantized(2)).unwrap();
    assert!(
        quantized.len() * 3 < text.len(),
        "{} vs {}",
        quantized.len(),
        text.len()
    );
    assert_eq!(decode(&quantized).unwrap(), doc);
}

#[test]
fn test_epoch_length_colliding_with_absent_marker_rejected() {
    let mut doc = recording(2, 100);
    doc.set_epoch_length(Some(usize::MAX)).unwrap();
    if usize::BITS == 64 {
        assert!(matches!(encode(&doc), Err(CodecError::InvalidConfig(_))));
    } else {
        assert_eq!(decode(&encode(&doc).unwrap()).unwrap(), doc);
    }

    doc.set_epoch_length(Some(usize::MAX - 1)).unwrap();
    let decoded = decode(&encode(&doc).unwrap()).unwrap();
    assert_eq!(decoded.epoch_length(), Some(usize::MAX - 1));
    assert_eq!(decoded, doc);
}

#[test]
fn test_oversized_lengths_rejected() {
    assert_eq!(length_u32(7, "event count").unwrap(), 7);
    assert!(matches!(
        length_u32(u32::MAX as usize, "event count"),
        Err(CodecError::InvalidConfig(_))
    ));
    assert!(matches!(
        length_u32(usize::MAX, "event type name"),
        Err(CodecError::InvalidConfig(_))
    ));
    assert!(epoch_u64(usize::MAX - 1).is_ok());
}

#[test]
fn test_unsupported_version_rejected() {
    let mut bytes = encode(&recording(2, 100)).unwrap();
    bytes[4..6].copy_from_slice(&2u16.to_le_bytes());
    assert!(matches!(
        decode(&bytes),
        Err(CodecError::UnsupportedVersion(2))
    ));
}

#[test]
fn test_bad_signature_rejected() {
    let mut bytes = encode(&recording(2, 100)).unwrap();
    bytes[0] = b'X';
    assert_corrupted(decode(&bytes));
    assert_corrupted(decode(b"not a document at all"));
    assert_corrupted(decode(&[]));
}

#[test]
fn test_every_truncation_rejected() {
    let bytes = encode(&recording(3, 60)).unwrap();
    for len in 0..bytes.len() {
        assert_corrupted(decode(&bytes[..len]));
    }
}

#[test]
fn test_trailing_bytes_rejected() {
    let mut bytes = encode(&recording(2, 100)).unwrap();
    bytes.push(0);
    assert_corrupted(decode(&bytes));
}

#[test]
fn test_checksum_mismatch_rejected() {
    let original = encode(&recording(2, 100)).unwrap();

    let mut bad_crc = original.clone();
    bad_crc[64] ^= 0x01;
    assert_corrupted(decode(&bad_crc));

    let mut bad_payload = original.clone();
    let last = bad_payload.len() - 10;
    bad_payload[last] ^= 0xFF;
    assert_corrupted(decode(&bad_payload));
}

#[test]
fn test_invalid_fields_rejected() {
    let doc = recording(2, 100);
    let original = encode(&doc).unwrap();

    let mut zero_rate = original.clone();
    zero_rate[16..24].copy_from_slice(&0f64.to_le_bytes());
    assert_corrupted(decode(&zero_rate));

    let prefix_offset = HEADER_LEN + "S01 ✓".len() + "resting state".len() + 16;
    let mut bad_prefix = original.clone();
    bad_prefix[prefix_offset] = 200;
    assert_corrupted(decode(&bad_prefix));

    let mut bad_encoding = original;
    bad_encoding[6] = 9;
    assert_corrupted(decode(&bad_encoding));
}

#[test]
fn test_invalid_config_rejected() {
    let doc = recording(1, 10);
    let too_high = CodecConfig {
        compression_level: 12,
        ..CodecConfig::default()
    };
    assert!(matches!(
        encode_with(&doc, &too_high),
        Err(CodecError::InvalidConfig(_))
    ));
    assert!(matches!(
        encode_with(&doc, &CodecConfig::default().quantized(MAX_DECIMALS + 1)),
        Err(CodecError::InvalidConfig(_))
    ));

    let huge = DocumentContents::new(
        10.0,
        vec![Stream::new(resolve("Cz").unwrap(), vec![1e300])],
    )
    .unwrap();
    assert!(matches!(
        encode_with(&huge, &CodecConfig::default().quantized(2)),
        Err(CodecError::InvalidConfig(_))
    ));
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("recording.{}", EXTENSION));
    let doc = recording(4, 256);

    write_document(&path, &doc, &CodecConfig::max_compression()).unwrap();
    assert_eq!(read_document(&path).unwrap(), doc);

    assert!(matches!(
        read_document(dir.path().join("missing.eegd")),
        Err(CodecError::IoError(_))
    ));
}
