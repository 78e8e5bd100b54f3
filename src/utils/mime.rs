//! MIME type detection utilities
//!
//! Classification never fails: when nothing is known the generic binary type
//! is returned.

use crate::defaults::attachment::GENERIC_MIME_TYPE;

/// IANA-registered top-level media types.
///
/// Extension tables also carry legacy, unregistered trees (e.g. `chemical/*`);
/// those guesses are discarded so that unusual extensions degrade to the
/// generic type.
const REGISTERED_TOP_LEVEL_TYPES: &[&str] = &[
    "application",
    "audio",
    "font",
    "image",
    "message",
    "model",
    "multipart",
    "text",
    "video",
];

fn is_registered(mime: &str) -> bool {
    mime.split('/')
        .next()
        .is_some_and(|top| REGISTERED_TOP_LEVEL_TYPES.contains(&top))
}

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME by file path or URL (extension-based)
pub fn guess_mime_from_path_or_url(path_or_url: &str) -> Option<String> {
    mime_guess::from_path(path_or_url)
        .iter_raw()
        .find(|m| is_registered(m))
        .map(|s| s.to_string())
}

/// Whether `hint` is shaped like a `type/subtype` MIME string.
pub fn is_mime_like(hint: &str) -> bool {
    let hint = hint.trim();
    match hint.split_once('/') {
        Some((top, sub)) => {
            !top.is_empty()
                && !sub.is_empty()
                && !sub.contains('/')
                && !hint.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Map a filename's extension to a MIME type, falling back to the generic type.
pub fn classify(filename: &str) -> String {
    guess_mime_from_path_or_url(filename).unwrap_or_else(|| GENERIC_MIME_TYPE.to_string())
}

/// Like [`classify`], but a well-formed explicit hint wins over the extension.
pub fn classify_with_hint(filename: Option<&str>, hint: Option<&str>) -> String {
    if let Some(h) = hint
        && is_mime_like(h)
    {
        return h.trim().to_ascii_lowercase();
    }
    filename
        .map(classify)
        .unwrap_or_else(|| GENERIC_MIME_TYPE.to_string())
}

/// Combined guess: prefer bytes, fall back to extension, otherwise octet-stream
pub fn guess_mime(bytes: Option<&[u8]>, path_or_url: Option<&str>) -> String {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    if let Some(p) = path_or_url
        && let Some(m) = guess_mime_from_path_or_url(p)
    {
        return m;
    }
    GENERIC_MIME_TYPE.to_string()
}
