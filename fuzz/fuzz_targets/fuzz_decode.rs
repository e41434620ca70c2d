#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail cleanly, never panic
    if let Ok(doc) = eegdoc::codec::decode(data) {
        // Anything that decodes is a valid document and encodes again
        let bytes = eegdoc::codec::encode(&doc).expect("decoded document re-encodes");
        let again = eegdoc::codec::decode(&bytes).expect("re-encoded document decodes");
        assert_eq!(again.streams().len(), doc.streams().len());
        assert_eq!(again.sample_count(), doc.sample_count());
    }
});
