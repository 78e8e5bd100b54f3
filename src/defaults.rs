//! Default Configuration Values
//!
//! This module centralizes all default values used by the dispatcher.
//! Having defaults in one place makes them easier to maintain, document, and adjust.

/// Attachment defaults
pub mod attachment {
    /// MIME type used when nothing better is known
    pub const GENERIC_MIME_TYPE: &str = "application/octet-stream";

    /// Display name for sources that carry no filename (e.g. raw buffers)
    pub const PLACEHOLDER_FILENAME: &str = "attachment.bin";
}

/// Shared sampling defaults
pub mod sampling {
    /// Output token budget used when the caller does not set one.
    ///
    /// Anthropic rejects requests without `max_tokens`, so every provider
    /// receives an explicit value.
    pub const MAX_TOKENS: u32 = 4096;
}

/// OpenAI defaults
pub mod openai {
    pub const BASE_URL: &str = "https://api.openai.com/v1";
    pub const MODEL: &str = "gpt-4o";
    pub const TEMPERATURE: f64 = 1.0;
    pub const TOP_P: f64 = 1.0;

    /// `purpose` form field sent with file uploads
    pub const UPLOAD_PURPOSE: &str = "assistants";

    /// Media types that must go through the Files API before being referenced
    pub const UPLOAD_MEDIA_TYPES: &[&str] = &["application/pdf"];
}

/// Gemini defaults
pub mod gemini {
    pub const BASE_URL: &str = "https://generativelanguage.googleapis.com";
    pub const API_VERSION: &str = "v1beta";
    pub const MODEL: &str = "gemini-2.5-pro";
    pub const TEMPERATURE: f64 = 1.0;
    pub const TOP_P: f64 = 0.95;
    pub const TOP_K: u32 = 40;
    pub const CANDIDATE_COUNT: u32 = 1;
    pub const SAFETY_THRESHOLD: &str = "BLOCK_ONLY_HIGH";

    /// Harm categories that receive the configured safety threshold
    pub const SAFETY_CATEGORIES: &[&str] = &[
        "HARM_CATEGORY_HATE_SPEECH",
        "HARM_CATEGORY_HARASSMENT",
        "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        "HARM_CATEGORY_DANGEROUS_CONTENT",
    ];
}

/// Anthropic defaults
pub mod anthropic {
    pub const BASE_URL: &str = "https://api.anthropic.com/v1";
    pub const MODEL: &str = "claude-sonnet-4-20250514";
    pub const API_VERSION: &str = "2023-06-01";
    pub const TEMPERATURE: f64 = 1.0;
    pub const TOP_P: f64 = 0.95;
    pub const TOP_K: u32 = 40;
}
