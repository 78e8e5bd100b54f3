//! Attachment source adapter
//!
//! Turns any [`AttachmentSource`] into a [`CanonicalAttachment`].

use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use super::source::{AttachmentHints, AttachmentSource, ReadSeek};
use crate::defaults::attachment::PLACEHOLDER_FILENAME;
use crate::error::LlmError;
use crate::types::CanonicalAttachment;
use crate::utils::mime;

/// Read `source` fully and classify it.
///
/// - paths that are missing or unreadable fail with `NotFound`
/// - buffers are used as-is
/// - streams are read from the start and then put back at the position they
///   had on entry, on success and on failure alike
///
/// The MIME type comes from the explicit hint, then the filename extension.
/// Sources with neither a filename nor a hint are sniffed by magic bytes.
pub fn adapt(
    source: AttachmentSource<'_>,
    hints: &AttachmentHints,
) -> Result<CanonicalAttachment, LlmError> {
    let kind = source.kind();
    let (bytes, origin_name) = match source {
        AttachmentSource::Path(path) => {
            let bytes = read_path(&path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned());
            (bytes, name)
        }
        AttachmentSource::Bytes(bytes) => (bytes, None),
        AttachmentSource::Stream(reader) => (read_stream(reader)?, None),
    };

    let filename = hints
        .filename
        .clone()
        .filter(|f| !f.trim().is_empty())
        .or(origin_name);

    let mime_type = match (&filename, hints.mime_type.as_deref()) {
        (None, None) => mime::guess_mime(Some(&bytes), None),
        (name, hint) => mime::classify_with_hint(name.as_deref(), hint),
    };

    tracing::debug!(
        target: "llm_dispatch::attachment",
        source = kind,
        size = bytes.len(),
        mime_type = %mime_type,
        "adapted attachment"
    );

    Ok(CanonicalAttachment::new(
        bytes,
        mime_type,
        filename.unwrap_or_else(|| PLACEHOLDER_FILENAME.to_string()),
    ))
}

fn read_path(path: &Path) -> Result<Vec<u8>, LlmError> {
    std::fs::read(path).map_err(|e| {
        LlmError::NotFound(format!(
            "Attachment '{}' could not be read: {e}",
            path.display()
        ))
    })
}

/// Read a stream from the start and restore its entry position.
fn read_stream(reader: &mut dyn ReadSeek) -> Result<Vec<u8>, LlmError> {
    let original = match reader.stream_position() {
        Ok(pos) => pos,
        Err(e) => {
            restore_position(reader, 0);
            return Err(LlmError::attachment_read(
                "failed to query attachment stream position",
                e,
            ));
        }
    };

    match read_from_start(reader) {
        Ok(bytes) => {
            reader.seek(SeekFrom::Start(original)).map_err(|e| {
                LlmError::attachment_read("failed to restore attachment stream position", e)
            })?;
            Ok(bytes)
        }
        Err(e) => {
            restore_position(reader, original);
            Err(e)
        }
    }
}

fn read_from_start(reader: &mut dyn ReadSeek) -> Result<Vec<u8>, LlmError> {
    reader
        .seek(SeekFrom::Start(0))
        .map_err(|e| LlmError::attachment_read("failed to rewind attachment stream", e))?;
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|e| LlmError::attachment_read("failed to read attachment stream", e))?;
    Ok(buf)
}

/// Best-effort seek after a failure; never masks the original error.
fn restore_position(reader: &mut dyn ReadSeek, position: u64) {
    if let Err(e) = reader.seek(SeekFrom::Start(position)) {
        tracing::warn!(
            target: "llm_dispatch::attachment",
            error = %e,
            position,
            "failed to restore attachment stream position"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read, Seek};

    fn adapt_stream(cursor: &mut Cursor<Vec<u8>>, filename: &str) -> CanonicalAttachment {
        let hints = AttachmentHints {
            filename: Some(filename.to_string()),
            mime_type: None,
        };
        adapt(AttachmentSource::Stream(cursor), &hints).unwrap()
    }

    #[test]
    fn bytes_are_used_directly_with_placeholder_name() {
        let a = adapt(
            AttachmentSource::Bytes(b"raw".to_vec()),
            &AttachmentHints::default(),
        )
        .unwrap();
        assert_eq!(a.bytes(), b"raw");
        assert_eq!(a.filename(), PLACEHOLDER_FILENAME);
        assert_eq!(a.mime_type(), "application/octet-stream");
    }

    #[test]
    fn unnamed_bytes_are_sniffed() {
        let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        png.extend_from_slice(&[0; 16]);
        let a = adapt(AttachmentSource::Bytes(png), &AttachmentHints::default()).unwrap();
        assert_eq!(a.mime_type(), "image/png");
    }

    #[test]
    fn named_sources_are_never_sniffed() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3, 4];
        let hints = AttachmentHints {
            filename: Some("file.xyz".to_string()),
            mime_type: None,
        };
        let a = adapt(AttachmentSource::Bytes(jpeg), &hints).unwrap();
        assert_eq!(a.mime_type(), "application/octet-stream");
        assert_eq!(a.filename(), "file.xyz");
    }

    #[test]
    fn missing_path_is_not_found() {
        let err = adapt(
            AttachmentSource::Path("/no/such/dir/report.pdf".into()),
            &AttachmentHints::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LlmError::NotFound(_)));
    }

    #[test]
    fn stream_is_reusable_and_position_restored() {
        let data = b"Reusable content".to_vec();
        let mut cursor = Cursor::new(data.clone());
        cursor.seek(SeekFrom::Start(5)).unwrap();

        let first = adapt_stream(&mut cursor, "call.txt");
        assert_eq!(cursor.position(), 5);
        let second = adapt_stream(&mut cursor, "call.txt");
        assert_eq!(cursor.position(), 5);

        assert_eq!(first, second);
        assert_eq!(first.bytes(), data.as_slice());
        assert_eq!(first.mime_type(), "text/plain");
    }

    struct FailingRead {
        inner: Cursor<Vec<u8>>,
    }

    impl Read for FailingRead {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("cannot read"))
        }
    }

    impl Seek for FailingRead {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn read_failure_is_attachment_read_error_and_position_restored() {
        let mut reader = FailingRead {
            inner: Cursor::new(vec![0; 32]),
        };
        reader.seek(SeekFrom::Start(7)).unwrap();

        let err = adapt(
            AttachmentSource::Stream(&mut reader),
            &AttachmentHints::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LlmError::AttachmentReadError { .. }));
        assert_eq!(reader.inner.position(), 7);
    }

    struct Unseekable;

    impl Read for Unseekable {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Ok(0)
        }
    }

    impl Seek for Unseekable {
        fn seek(&mut self, _pos: SeekFrom) -> std::io::Result<u64> {
            Err(std::io::Error::other("not seekable"))
        }
    }

    #[test]
    fn seek_failure_is_attachment_read_error() {
        let mut reader = Unseekable;
        let err = adapt(
            AttachmentSource::Stream(&mut reader),
            &AttachmentHints::default(),
        )
        .unwrap_err();
        match err {
            LlmError::AttachmentReadError { source, .. } => {
                assert_eq!(source.to_string(), "not seekable");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
