//! Media-family routing shared by the payload builders

use crate::types::{CanonicalAttachment, MediaKind};

/// What an attachment contributes to the content sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentContent {
    /// Inline base64 image
    Image,
    /// PDF; inlined or referenced depending on the provider
    Document,
    /// Decoded text with its provenance line
    Text(String),
    /// Description of a file the model cannot read directly
    Note(String),
}

/// Route `attachment` by media family.
///
/// Returns `None` when the attachment contributes nothing, i.e. text that
/// decodes to an empty or whitespace-only string.
pub fn plan_attachment(attachment: &CanonicalAttachment) -> Option<AttachmentContent> {
    match attachment.media_kind() {
        MediaKind::Image => Some(AttachmentContent::Image),
        MediaKind::Pdf => Some(AttachmentContent::Document),
        MediaKind::Text => decoded_text(attachment).map(AttachmentContent::Text),
        MediaKind::Other => Some(AttachmentContent::Note(unsupported_note(attachment))),
    }
}

/// Lossy UTF-8 decoding prefixed with the source filename.
pub fn decoded_text(attachment: &CanonicalAttachment) -> Option<String> {
    let text = String::from_utf8_lossy(attachment.bytes());
    if text.trim().is_empty() {
        return None;
    }
    Some(format!("(Contents of {}):\n\n{}", attachment.filename(), text))
}

pub fn unsupported_note(attachment: &CanonicalAttachment) -> String {
    format!(
        "[Attachment note: a file named '{}' of type '{}' was supplied but cannot be \
         interpreted directly; respond using the prompt and this description.]",
        attachment.filename(),
        attachment.mime_type()
    )
}
