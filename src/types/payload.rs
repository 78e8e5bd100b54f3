//! Provider request bodies

use super::provider::ProviderType;

/// A provider-specific request body, built fresh for every call.
///
/// The body embeds base64 attachment content, so it is never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPayload {
    pub provider: ProviderType,
    /// Model the body targets (Gemini puts it in the URL rather than the body)
    pub model: String,
    pub body: serde_json::Value,
}

impl ProviderPayload {
    pub fn new(provider: ProviderType, model: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            provider,
            model: model.into(),
            body,
        }
    }

    /// Content blocks of the single user turn, whatever the provider calls them.
    pub fn content_blocks(&self) -> &[serde_json::Value] {
        let blocks = match self.provider {
            ProviderType::OpenAi => self.body.pointer("/input/0/content"),
            ProviderType::Gemini => self.body.pointer("/contents/0/parts"),
            ProviderType::Anthropic => self.body.pointer("/messages/0/content"),
        };
        blocks
            .and_then(|v| v.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
