use super::{DocumentContents, DocumentError, DocumentId, Stream};

/// Builder for [`DocumentContents`].
///
/// All invariants are checked once in [`DocumentBuilder::build`], so a document
/// can be assembled in any order.
///
/// ```rust
/// use eegdoc::document::{DocumentContents, Stream};
/// use eegdoc::electrode::resolve;
///
/// let doc = DocumentContents::builder(256.0)
///     .subject("S01")
///     .stream(Stream::new(resolve("Cz")?, vec![0.0; 512]))
///     .event("stimulus", 128)
///     .epoch_length(64)
///     .build()?;
/// assert_eq!(doc.sample_count(), Some(512));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    id: Option<DocumentId>,
    sample_rate: f64,
    subject: Option<String>,
    info: Option<String>,
    streams: Vec<Stream>,
    events: Vec<(String, usize)>,
    epoch_length: Option<usize>,
}

impl DocumentBuilder {
    /// Start a document with the given sample rate in Hz
    pub fn new(sample_rate: f64) -> Self {
        Self {
            id: None,
            sample_rate,
            subject: None,
            info: None,
            streams: Vec::new(),
            events: Vec::new(),
            epoch_length: None,
        }
    }

    /// Use a known document identifier instead of a fresh one
    pub fn id(mut self, id: DocumentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the subject description
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the free-text recording info
    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Append a stream (display order is append order)
    pub fn stream(mut self, stream: Stream) -> Self {
        self.streams.push(stream);
        self
    }

    /// Append several streams
    pub fn streams(mut self, streams: impl IntoIterator<Item = Stream>) -> Self {
        self.streams.extend(streams);
        self
    }

    /// Add an event marker
    pub fn event(mut self, event_type: impl Into<String>, sample_index: usize) -> Self {
        self.events.push((event_type.into(), sample_index));
        self
    }

    /// Set the epoch length in samples
    pub fn epoch_length(mut self, samples: usize) -> Self {
        self.epoch_length = Some(samples);
        self
    }

    /// Validate and build the document
    pub fn build(self) -> Result<DocumentContents, DocumentError> {
        let mut document = DocumentContents::new(self.sample_rate, self.streams)?;
        if let Some(id) = self.id {
            document.id = id;
        }
        document.subject = self.subject;
        document.info = self.info;
        document.set_epoch_length(self.epoch_length)?;
        for (event_type, sample_index) in &self.events {
            document.insert_event(event_type, *sample_index)?;
        }
        Ok(document)
    }
}
