//! Gemini payload builder
//!
//! Gemini takes every attachment inline: images and PDFs as `inline_data`
//! parts, text as decoded `text` parts.

use super::types::{Blob, Content, GenerateContentRequest, GenerationConfig, Part, SafetySetting};
use crate::config::GeminiConfig;
use crate::error::LlmError;
use crate::transformers::{AttachmentContent, PayloadBuilder, plan_attachment};
use crate::types::{CanonicalAttachment, ProviderPayload, ProviderType, RequestParameters};

#[derive(Debug, Clone)]
pub struct GeminiPayloadBuilder {
    config: GeminiConfig,
}

impl GeminiPayloadBuilder {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    fn attachment_part(attachment: &CanonicalAttachment) -> Option<Part> {
        match plan_attachment(attachment)? {
            AttachmentContent::Image | AttachmentContent::Document => Some(Part::InlineData {
                inline_data: Blob {
                    mime_type: attachment.mime_type().to_string(),
                    data: attachment.base64_data(),
                },
            }),
            AttachmentContent::Text(text) | AttachmentContent::Note(text) => Some(Part::text(text)),
        }
    }

    fn safety_settings(&self) -> Vec<SafetySetting> {
        self.config
            .safety_categories
            .iter()
            .map(|category| SafetySetting {
                category: category.clone(),
                threshold: self.config.safety_threshold.clone(),
            })
            .collect()
    }
}

impl PayloadBuilder for GeminiPayloadBuilder {
    fn provider(&self) -> ProviderType {
        ProviderType::Gemini
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

        let mut parts: Vec<Part> = attachment.and_then(Self::attachment_part).into_iter().collect();
        parts.push(Part::text(params.prompt()));

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: GenerationConfig {
                max_output_tokens: sampling.max_tokens,
                temperature: sampling.temperature,
                top_p: sampling.top_p,
                top_k: sampling.top_k,
                candidate_count: sampling.candidate_count,
            },
            safety_settings: self.safety_settings(),
            system_instruction: params.system_instruction().map(|s| Content {
                role: None,
                parts: vec![Part::text(s)],
            }),
        };

        let body = serde_json::to_value(&request)
            .map_err(|e| LlmError::ParseError(format!("Failed to serialize Gemini request: {e}")))?;
        Ok(ProviderPayload::new(ProviderType::Gemini, sampling.model, body))
    }
}
