//! Canonical attachment representation

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::provider::ProviderType;
use crate::defaults;

/// Broad media family used to pick a content-block shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// `image/*`
    Image,
    /// `application/pdf`
    Pdf,
    /// `text/*`
    Text,
    /// Anything else
    Other,
}

impl MediaKind {
    /// Classify a MIME type string into a media family.
    pub fn from_mime(mime_type: &str) -> Self {
        let mime = mime_type.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Self::Image
        } else if mime == "application/pdf" {
            Self::Pdf
        } else if mime.starts_with("text/") {
            Self::Text
        } else {
            Self::Other
        }
    }
}

/// Opaque reference to a file stored on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFileHandle {
    /// Provider that owns the stored file
    pub provider: ProviderType,
    /// Provider-assigned id (e.g. `file-abc123`)
    pub id: String,
}

impl UploadedFileHandle {
    pub fn new(provider: ProviderType, id: impl Into<String>) -> Self {
        Self {
            provider,
            id: id.into(),
        }
    }
}

/// Normalized in-memory attachment.
///
/// Once built, nothing downstream can tell whether the bytes came from a path,
/// a buffer or a stream. `mime_type` is never empty and `filename` is a display
/// name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalAttachment {
    bytes: Vec<u8>,
    mime_type: String,
    filename: String,
    provider_file_reference: Option<UploadedFileHandle>,
}

impl CanonicalAttachment {
    /// Create an attachment; empty MIME types and filenames fall back to defaults.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>, filename: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        let filename = filename.into();
        Self {
            bytes,
            mime_type: if mime_type.trim().is_empty() {
                defaults::attachment::GENERIC_MIME_TYPE.to_string()
            } else {
                mime_type
            },
            filename: if filename.trim().is_empty() {
                defaults::attachment::PLACEHOLDER_FILENAME.to_string()
            } else {
                filename
            },
            provider_file_reference: None,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime_type)
    }

    /// Upload reference attached by the lifecycle manager, if any.
    pub fn file_reference(&self) -> Option<&UploadedFileHandle> {
        self.provider_file_reference.as_ref()
    }

    /// Return a copy of this attachment carrying an upload reference.
    pub fn with_file_reference(mut self, handle: UploadedFileHandle) -> Self {
        self.provider_file_reference = Some(handle);
        self
    }

    /// Standard base64 encoding of the content.
    pub fn base64_data(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    /// `data:` URL for providers that accept inline URLs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_data())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
