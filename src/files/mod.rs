//! Out-of-band file storage
//!
//! Some providers only accept certain media types by reference to a file
//! uploaded beforehand. [`FileStore`] is the upload/delete pair such a provider
//! exposes; [`lifecycle`] scopes an upload to a single provider call.

pub mod lifecycle;

pub use lifecycle::{AttachmentLifecycle, LifecycleState, with_uploaded};

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{CanonicalAttachment, UploadedFileHandle};

/// Provider-side file storage.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Upload the attachment's bytes; failures are `UploadError`.
    async fn upload(
        &self,
        attachment: &CanonicalAttachment,
    ) -> Result<UploadedFileHandle, LlmError>;

    /// Delete a previously uploaded file.
    async fn delete(&self, handle: &UploadedFileHandle) -> Result<(), LlmError>;
}
