//! Attachment ingestion
//!
//! [`AttachmentInput`] gathers whatever the caller supplied, [`adapt`] turns the
//! single validated origin into a [`CanonicalAttachment`](crate::types::CanonicalAttachment).

pub mod adapter;
pub mod source;

pub use adapter::adapt;
pub use source::{AttachmentHints, AttachmentInput, AttachmentSource, ReadSeek};
