//! Payload transformers
//!
//! Every provider turns the same inputs (parameters plus an optional canonical
//! attachment) into its own request body through a [`PayloadBuilder`].
//! [`content`] holds the media-family routing the builders share.

pub mod content;
pub mod request;

pub use content::{AttachmentContent, plan_attachment};
pub use request::PayloadBuilder;
