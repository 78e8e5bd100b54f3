//! Request transformation trait

use crate::error::LlmError;
use crate::types::{CanonicalAttachment, ProviderPayload, ProviderType, RequestParameters};

/// Build a provider-specific request body.
///
/// Implementations are provider-pure: no I/O, no shared state. The prompt is
/// always the last content block, and the system instruction is placed with
/// the provider's own mechanism rather than in the content sequence.
pub trait PayloadBuilder: Send + Sync {
    fn provider(&self) -> ProviderType;

    fn build(
        &self,
        params: &RequestParameters,
        attachment: Option<&CanonicalAttachment>,
    ) -> Result<ProviderPayload, LlmError>;
}
