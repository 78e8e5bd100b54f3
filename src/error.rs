//! Error Handling Module
//!
//! Every failure surfaced by the crate is an [`LlmError`]. Each variant is a
//! distinct, matchable kind so callers never have to parse messages:
//!
//! - input-shape problems (`ConfigurationError`) are detected before any I/O
//! - attachment problems (`NotFound`, `AttachmentReadError`) come from the adapter
//! - `UploadError` aborts a dispatch before the provider call
//! - `ApiError` carries the provider's status code and raw body verbatim
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_dispatch::error::{ErrorCategory, LlmError};
//!
//! let error = LlmError::api_error(404, "Not found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! assert!(!error.is_retryable());
//! ```

use thiserror::Error;

/// Coarse grouping of errors for presentation and retry hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller supplied contradictory or invalid input
    Configuration,
    /// The attachment could not be read
    Attachment,
    /// Credentials were missing or rejected
    Authentication,
    /// Provider rejected the request (4xx)
    Client,
    /// Provider failed (5xx)
    Server,
    /// Transport never produced a response
    Network,
    /// Response body could not be interpreted
    Parsing,
    /// Programming-contract violation inside the crate
    Internal,
}

/// Errors produced while ingesting attachments and dispatching requests.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Contradictory or invalid combination of inputs
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Attachment path does not exist or cannot be opened
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reading or seeking an attachment stream failed
    #[error("Attachment read error: {message}")]
    AttachmentReadError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A payload builder needed an upload reference that was never attached
    #[error("Missing upload reference: {0}")]
    MissingUploadReference(String),

    /// Pre-upload of an attachment failed
    #[error("Upload error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    UploadError {
        status: Option<u16>,
        message: String,
    },

    /// Provider returned a non-success status
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Transport-level failure (connection, TLS, body read)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Response body was not in the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),

    /// No credential available for the provider
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// Operation not supported by this provider or transport
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl LlmError {
    /// Build an `ApiError` from a status code and raw body text.
    ///
    /// When the body parses as JSON it is also kept as `details`.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let details = serde_json::from_str::<serde_json::Value>(&message).ok();
        Self::ApiError {
            code,
            message,
            details,
        }
    }

    pub(crate) fn attachment_read(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::AttachmentReadError {
            message: message.into(),
            source,
        }
    }

    /// HTTP status associated with the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            Self::UploadError { status, .. } => *status,
            _ => None,
        }
    }

    /// Coarse category of the error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) => ErrorCategory::Configuration,
            Self::NotFound(_) | Self::AttachmentReadError { .. } => ErrorCategory::Attachment,
            Self::MissingApiKey(_) => ErrorCategory::Authentication,
            Self::ApiError { code, .. } | Self::UploadError {
                status: Some(code), ..
            } => match code {
                401 | 403 => ErrorCategory::Authentication,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            Self::UploadError { status: None, .. } | Self::HttpError(_) => ErrorCategory::Network,
            Self::ParseError(_) => ErrorCategory::Parsing,
            Self::MissingUploadReference(_) | Self::UnsupportedOperation(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Whether an external retry policy could reasonably try again.
    ///
    /// Nothing inside this crate retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpError(_) => true,
            Self::ApiError { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}
