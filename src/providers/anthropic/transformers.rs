//! Anthropic Messages API payload builder

use serde_json::{Value, json};

use crate::config::AnthropicConfig;
use crate::error::LlmError;
use crate::transformers::{AttachmentContent, PayloadBuilder, plan_attachment};
use crate::types::{CanonicalAttachment, ProviderPayload, ProviderType, RequestParameters};

/// Builds `POST /messages` bodies with native `image` and `document` blocks.
#[derive(Debug, Clone)]
pub struct AnthropicPayloadBuilder {
    config: AnthropicConfig,
}

impl AnthropicPayloadBuilder {
    pub fn new(config: AnthropicConfig) -> Self {
        Self { config }
    }
}

fn base64_block(kind: &str, attachment: &CanonicalAttachment) -> Value {
    json!({
        "type": kind,
        "source": {
            "type": "base64",
            "media_type": attachment.mime_type(),
            "data": attachment.base64_data(),
        }
    })
}

fn text_block(text: &str) -> Value {
    json!({ "type": "text", "text": text })
}

impl PayloadBuilder for AnthropicPayloadBuilder {
    fn provider(&self) -> ProviderType {
        ProviderType::Anthropic
    }

    fn build(
        &self,
        params: &RequestParameters,
        attachment: Option<&CanonicalAttachment>,
    ) -> Result<ProviderPayload, LlmError> {
        let sampling = self
            .config
            .sampling
            .resolve(&self.config.model, params.sampling());

        let mut content = Vec::new();
        if let Some(att) = attachment {
            match plan_attachment(att) {
                Some(AttachmentContent::Image) => content.push(base64_block("image", att)),
                Some(AttachmentContent::Document) => content.push(base64_block("document", att)),
                Some(AttachmentContent::Text(text)) | Some(AttachmentContent::Note(text)) => {
                    content.push(text_block(&text))
                }
                None => {}
            }
        }
        content.push(text_block(params.prompt()));

        let mut body = json!({
            "model": sampling.model,
            "max_tokens": sampling.max_tokens,
            "messages": [{ "role": "user", "content": content }],
            "temperature": sampling.temperature,
            "top_p": sampling.top_p,
        });
        if let Some(top_k) = sampling.top_k {
            body["top_k"] = json!(top_k);
        }
        if let Some(system) = params.system_instruction() {
            body["system"] = json!(system);
        }

        Ok(ProviderPayload::new(
            ProviderType::Anthropic,
            sampling.model,
            body,
        ))
    }
}
