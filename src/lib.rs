//! # eegdoc - EEG Recording Documents
//!
//! `eegdoc` is a library for multi-channel EEG recordings: one sample stream per
//! electrode, a shared sample rate, and sparse typed event markers. It imports the
//! loosely-structured comma-separated text that amplifier software exports, answers
//! the windowed queries a chart needs, and persists recordings in a compact binary
//! form.
//!
//! ## Key Features
//!
//! - **Strict electrode identities**: free-text labels resolve to a canonical
//!   [`Electrode`](electrode::Electrode) from the 10-20 region table, or fail.
//!
//! - **Validated aggregate**: [`DocumentContents`](document::DocumentContents) checks
//!   uniform stream length, sample rate and event ranges wherever data enters it.
//!
//! - **Zero-copy windowed queries**: [`query::sample_points`] yields chart-ready
//!   points over borrowed sub-slices of the sample arrays.
//!
//! - **Compact persistence**: the [`codec`] stores electrodes as codes and samples
//!   byte-stream-split and zlib-compressed, bit-exact by default.
//!
//! ## Quick Start
//!
//! ```rust
//! use eegdoc::prelude::*;
//!
//! let text = "Fp1,Fp2\n1.0,2.0\n3.0,-4.0\n";
//! let mut doc = import_document(text, 100.0)?;
//! doc.insert_event("stimulus", 1)?;
//!
//! // Everything from sample 1 on, stream by stream
//! let points = sample_points(doc.streams(), doc.sample_rate(), Some(1..100));
//! assert_eq!(points.len(), 2);
//! assert_eq!(points[1].potential, -4.0);
//!
//! // Marker position relative to the recording
//! assert_eq!(event_proportion(2, 1), Some(1.0));
//!
//! // Persist and restore
//! let bytes = encode(&doc)?;
//! assert_eq!(decode(&bytes)?, doc);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`electrode`]: electrode symbol resolution and ordering
//! - [`document`]: streams, events and the document aggregate
//! - [`import`]: tabular text import
//! - [`query`]: windowed sample queries
//! - [`overlay`]: event and epoch overlay positions
//! - [`codec`]: the `.eegd` binary format
//! - [`export`]: tabular text export
//!
//! All operations are synchronous and free of shared state. A document is
//! `Send + Sync`, so any number of threads may query one snapshot at once.

#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod document;
pub mod electrode;
pub mod export;
pub mod import;
pub mod overlay;
pub mod query;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::codec::{
        decode, encode, encode_with, read_document, write_document, CodecConfig, CodecError,
        Profile, SampleEncoding,
    };
    pub use crate::document::{
        time_at, DocumentBuilder, DocumentContents, DocumentError, DocumentId, DocumentSummary,
        Event, EventMarkers, PotentialRange, Stream, StreamId,
    };
    pub use crate::electrode::{resolve, Electrode, ElectrodeError, Hemisphere, Prefix, Suffix};
    pub use crate::export::{export_tabular, export_tabular_to_writer, ExportError};
    pub use crate::import::{
        import_document, import_document_from_path, import_streams, import_streams_from_path,
        import_streams_from_reader, ImportError,
    };
    pub use crate::overlay::{
        document_overlays, epoch_end_proportion, event_proportion, overlays, EventOverlay,
    };
    #[cfg(feature = "parallel")]
    pub use crate::query::par_sample_points;
    pub use crate::query::{
        clamp_window, iter_sample_points, sample_points, SamplePoint, SamplePoints,
    };
}
