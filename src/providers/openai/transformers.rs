//! OpenAI Responses API payload builder

use serde_json::{Value, json};

use crate::config::OpenAiConfig;
use crate::error::LlmError;
use crate::transformers::{AttachmentContent, PayloadBuilder, plan_attachment};
use crate::types::{
    CanonicalAttachment, MediaKind, ProviderPayload, ProviderType, RequestParameters,
};

/// Builds `POST /responses` bodies.
///
/// Media types on the configured upload list are only ever sent by file id;
/// other PDFs travel inline as `input_file` data URLs.
#[derive(Debug, Clone)]
pub struct OpenAiPayloadBuilder {
    config: OpenAiConfig,
}

impl OpenAiPayloadBuilder {
    pub fn new(config: OpenAiConfig) -> Self {
        Self { config }
    }

    fn requires_upload(&self, mime_type: &str) -> bool {
        self.config
            .upload_media_types
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(mime_type))
    }

    fn attachment_block(&self, attachment: &CanonicalAttachment) -> Result<Option<Value>, LlmError> {
        if let Some(handle) = attachment.file_reference() {
            let block = match attachment.media_kind() {
                MediaKind::Image => json!({ "type": "input_image", "file_id": handle.id }),
                _ => json!({ "type": "input_file", "file_id": handle.id }),
            };
            return Ok(Some(block));
        }

        if self.requires_upload(attachment.mime_type()) {
            return Err(LlmError::MissingUploadReference(format!(
                "OpenAI requires '{}' ({}) to be uploaded before it is referenced",
                attachment.filename(),
                attachment.mime_type()
            )));
        }

        let block = match plan_attachment(attachment) {
            None => return Ok(None),
            Some(AttachmentContent::Image) => json!({
                "type": "input_image",
                "image_url": attachment.data_url(),
            }),
            Some(AttachmentContent::Document) => json!({
                "type": "input_file",
                "filename": attachment.filename(),
                "file_data": attachment.data_url(),
            }),
            Some(AttachmentContent::Text(text)) | Some(AttachmentContent::Note(text)) => {
                json!({ "type": "input_text", "text": text })
            }
        };
        Ok(Some(block))
    }
}

impl PayloadBuilder for OpenAiPayloadBuilder {
    fn provider(&self) -> ProviderType {
        ProviderType::OpenAi
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
        if let Some(att) = attachment
            && let Some(block) = self.attachment_block(att)?
        {
            content.push(block);
        }
        content.push(json!({ "type": "input_text", "text": params.prompt() }));

        let mut body = json!({
            "model": sampling.model,
            "input": [{ "role": "user", "content": content }],
            "max_output_tokens": sampling.max_tokens,
            "temperature": sampling.temperature,
            "top_p": sampling.top_p,
        });
        if let Some(instructions) = params.system_instruction() {
            body["instructions"] = json!(instructions);
        }

        Ok(ProviderPayload::new(ProviderType::OpenAi, sampling.model, body))
    }
}
