use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

use super::transformers::GeminiPayloadBuilder;
use crate::config::GeminiConfig;
use crate::core::{ProviderCapabilities, ProviderContext, ProviderSpec};
use crate::error::LlmError;
use crate::transformers::PayloadBuilder;
use crate::types::{ProviderPayload, ProviderType};
use crate::utils::http_headers::ProviderHeaders;
use crate::utils::join_url;

/// Gemini ProviderSpec implementation
#[derive(Debug, Clone)]
pub struct GeminiSpec {
    config: GeminiConfig,
    builder: GeminiPayloadBuilder,
}

impl GeminiSpec {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            builder: GeminiPayloadBuilder::new(config.clone()),
            config,
        }
    }
}

impl ProviderSpec for GeminiSpec {
    fn id(&self) -> ProviderType {
        ProviderType::Gemini
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::new().with_inline_documents()
    }

    fn context(&self, api_key: SecretString) -> ProviderContext {
        ProviderContext::new(
            ProviderType::Gemini,
            self.config.base_url.clone(),
            api_key,
            self.config.headers.clone(),
        )
    }

    fn build_headers(&self, ctx: &ProviderContext) -> Result<HeaderMap, LlmError> {
        ProviderHeaders::gemini(ctx.api_key.expose_secret(), &ctx.http_extra_headers)
    }

    /// `{base}/{version}/models/{model}:generateContent`
    fn request_url(&self, payload: &ProviderPayload, ctx: &ProviderContext) -> String {
        let model = payload.model.trim_start_matches("models/");
        join_url(
            &ctx.base_url,
            &format!(
                "{}/models/{model}:generateContent",
                self.config.api_version.trim_matches('/')
            ),
        )
    }

    fn payload_builder(&self) -> &dyn PayloadBuilder {
        &self.builder
    }
}
