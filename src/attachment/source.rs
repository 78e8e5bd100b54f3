//! Attachment origins
//!
//! An attachment can come from exactly one of three places: a path on disk,
//! an owned in-memory buffer, or a caller-owned stream implementing
//! [`Read`] + [`Seek`]. [`AttachmentInput`] collects what the caller supplied
//! and rejects contradictory combinations before any I/O happens.
//!
//! # Concurrency
//!
//! Stream positions are not synchronized. Adapting the same stream from two
//! calls at once is a caller error; wrap shared streams in external
//! synchronization if they are reused concurrently.

use std::io::{Read, Seek};
use std::path::PathBuf;

use crate::error::LlmError;

/// Capability required of stream attachments.
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// Exactly one attachment origin.
pub enum AttachmentSource<'a> {
    /// Readable file on disk
    Path(PathBuf),
    /// Owned in-memory buffer
    Bytes(Vec<u8>),
    /// Caller-owned stream; its position is restored after adaptation
    Stream(&'a mut dyn ReadSeek),
}

impl AttachmentSource<'_> {
    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Path(_) => "path",
            Self::Bytes(_) => "bytes",
            Self::Stream(_) => "stream",
        }
    }
}

impl std::fmt::Debug for AttachmentSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Optional naming and typing hints that travel with a source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentHints {
    /// Display filename; for path sources it defaults to the file name
    pub filename: Option<String>,
    /// Explicit MIME type; wins over extension-based classification
    pub mime_type: Option<String>,
}

/// Caller-facing attachment input with every origin optional.
///
/// ```rust,ignore
/// let input = AttachmentInput::new()
///     .stream(&mut cursor)
///     .filename("scan.pdf");
/// ```
#[derive(Default)]
pub struct AttachmentInput<'a> {
    path: Option<PathBuf>,
    bytes: Option<Vec<u8>>,
    stream: Option<&'a mut dyn ReadSeek>,
    hints: AttachmentHints,
}

impl<'a> AttachmentInput<'a> {
    /// No attachment.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.bytes = Some(bytes.into());
        self
    }

    pub fn stream(mut self, stream: &'a mut dyn ReadSeek) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.hints.filename = Some(filename.into());
        self
    }

    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.hints.mime_type = Some(mime_type.into());
        self
    }

    /// Whether any origin was supplied.
    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.bytes.is_none() && self.stream.is_none()
    }

    /// Validate mutual exclusivity and return the single origin, if any.
    ///
    /// Fails with `ConfigurationError` when more than one origin is set,
    /// regardless of whether each origin would be readable on its own.
    pub fn into_source(self) -> Result<Option<(AttachmentSource<'a>, AttachmentHints)>, LlmError> {
        let supplied: Vec<&str> = [
            self.path.as_ref().map(|_| "path"),
            self.bytes.as_ref().map(|_| "bytes"),
            self.stream.as_ref().map(|_| "stream"),
        ]
        .into_iter()
        .flatten()
        .collect();

        if supplied.len() > 1 {
            return Err(LlmError::ConfigurationError(format!(
                "Only one attachment origin may be supplied, got: {}",
                supplied.join(", ")
            )));
        }

        let source = match (self.path, self.bytes, self.stream) {
            (Some(path), None, None) => AttachmentSource::Path(path),
            (None, Some(bytes), None) => AttachmentSource::Bytes(bytes),
            (None, None, Some(stream)) => AttachmentSource::Stream(stream),
            _ => return Ok(None),
        };
        Ok(Some((source, self.hints)))
    }
}
