//! Core data types shared across the dispatcher
//!
//! - [`ProviderType`]: which vendor a request targets
//! - [`CanonicalAttachment`]: the normalized attachment every builder consumes
//! - [`RequestParameters`] / [`SamplingParams`]: per-call inputs
//! - [`ProviderPayload`]: the provider-specific body produced by a builder

pub mod attachment;
pub mod params;
pub mod payload;
pub mod provider;

pub use attachment::{CanonicalAttachment, MediaKind, UploadedFileHandle};
pub use params::{RequestParameters, RequestParametersBuilder, SamplingParams};
pub use payload::ProviderPayload;
pub use provider::ProviderType;
