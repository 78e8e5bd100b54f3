//! Scoped upload lifecycle
//!
//! Per attachment and per call the state moves
//! `NotUploaded -> Uploaded -> Referenced -> Deleted`. Once an upload has
//! succeeded, deletion is attempted exactly once on every exit path of the
//! scoped call, a panic inside it included. Deletion failures are logged and
//! never returned.

use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use super::FileStore;
use crate::error::LlmError;
use crate::types::{CanonicalAttachment, UploadedFileHandle};

/// Lifecycle state of one uploaded attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    NotUploaded,
    Uploaded,
    Referenced,
    Deleted,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotUploaded => "not_uploaded",
            Self::Uploaded => "uploaded",
            Self::Referenced => "referenced",
            Self::Deleted => "deleted",
        }
    }
}

/// State machine around a single upload.
pub struct AttachmentLifecycle {
    store: Arc<dyn FileStore>,
    state: LifecycleState,
    handle: Option<UploadedFileHandle>,
}

impl AttachmentLifecycle {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            state: LifecycleState::NotUploaded,
            handle: None,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn handle(&self) -> Option<&UploadedFileHandle> {
        self.handle.as_ref()
    }

    fn transition(&mut self, next: LifecycleState) {
        tracing::debug!(
            target: "llm_dispatch::files",
            from = self.state.as_str(),
            to = next.as_str(),
            file_id = self.handle.as_ref().map(|h| h.id.as_str()),
            "attachment lifecycle transition"
        );
        self.state = next;
    }

    /// Upload `attachment` and return it carrying the upload reference.
    ///
    /// On failure the state stays `NotUploaded` and nothing needs cleanup.
    pub async fn acquire(
        &mut self,
        attachment: CanonicalAttachment,
    ) -> Result<CanonicalAttachment, LlmError> {
        if self.state != LifecycleState::NotUploaded {
            return Err(LlmError::UnsupportedOperation(format!(
                "attachment lifecycle cannot upload from state {}",
                self.state.as_str()
            )));
        }

        let handle = self.store.upload(&attachment).await?;
        self.handle = Some(handle.clone());
        self.transition(LifecycleState::Uploaded);

        let attachment = attachment.with_file_reference(handle);
        self.transition(LifecycleState::Referenced);
        Ok(attachment)
    }

    /// Delete the uploaded file, if any. Never fails.
    pub async fn release(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if let Err(e) = self.store.delete(&handle).await {
            tracing::warn!(
                target: "llm_dispatch::files",
                provider = %handle.provider,
                file_id = %handle.id,
                error = %e,
                "failed to delete uploaded attachment"
            );
        }
        self.transition(LifecycleState::Deleted);
    }
}

/// Upload `attachment`, run `body` with the referenced attachment, then delete
/// the upload whatever `body` produced.
///
/// Upload failures return before `body` runs. A panic inside `body` is resumed
/// after deletion has been attempted.
pub async fn with_uploaded<T, F, Fut>(
    store: Arc<dyn FileStore>,
    attachment: CanonicalAttachment,
    body: F,
) -> Result<T, LlmError>
where
    F: FnOnce(CanonicalAttachment) -> Fut,
    Fut: Future<Output = Result<T, LlmError>>,
{
    let mut lifecycle = AttachmentLifecycle::new(store);
    let attachment = lifecycle.acquire(attachment).await?;

    let outcome = AssertUnwindSafe(body(attachment)).catch_unwind().await;
    lifecycle.release().await;

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
