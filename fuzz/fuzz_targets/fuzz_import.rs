#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8, odd delimiters and ragged rows must all fail cleanly
    let Ok(streams) = eegdoc::import::import_streams_from_reader(data) else {
        return;
    };

    // A successful import always has one uniform length
    if let Some(first) = streams.first() {
        assert!(streams.iter().all(|s| s.len() == first.len()));
    }

    // ...which makes it a valid document at any positive rate
    let doc = eegdoc::document::DocumentContents::new(250.0, streams)
        .expect("imported streams form a document");
    let points = eegdoc::query::sample_points(doc.streams(), doc.sample_rate(), Some(0..16));
    assert!(points.len() <= 16 * doc.streams().len());
});
