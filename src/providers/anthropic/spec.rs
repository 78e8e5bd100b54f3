use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};

use super::transformers::AnthropicPayloadBuilder;
use crate::config::AnthropicConfig;
use crate::core::{ProviderCapabilities, ProviderContext, ProviderSpec};
use crate::error::LlmError;
use crate::transformers::PayloadBuilder;
use crate::types::{ProviderPayload, ProviderType};
use crate::utils::http_headers::ProviderHeaders;
use crate::utils::join_url;

/// Anthropic ProviderSpec implementation
#[derive(Debug, Clone)]
pub struct AnthropicSpec {
    config: AnthropicConfig,
    builder: AnthropicPayloadBuilder,
}

impl AnthropicSpec {
    pub fn new(config: AnthropicConfig) -> Self {
        Self {
            builder: AnthropicPayloadBuilder::new(config.clone()),
            config,
        }
    }
}

impl ProviderSpec for AnthropicSpec {
    fn id(&self) -> ProviderType {
        ProviderType::Anthropic
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::new().with_inline_documents()
    }

    fn context(&self, api_key: SecretString) -> ProviderContext {
        ProviderContext::new(
            ProviderType::Anthropic,
            self.config.base_url.clone(),
            api_key,
            self.config.headers.clone(),
        )
    }

    fn build_headers(&self, ctx: &ProviderContext) -> Result<HeaderMap, LlmError> {
        ProviderHeaders::anthropic(
            ctx.api_key.expose_secret(),
            &self.config.api_version,
            &ctx.http_extra_headers,
        )
    }

    fn request_url(&self, _payload: &ProviderPayload, ctx: &ProviderContext) -> String {
        join_url(&ctx.base_url, "messages")
    }

    fn payload_builder(&self) -> &dyn PayloadBuilder {
        &self.builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_carry_version_and_key() {
        let spec = AnthropicSpec::new(AnthropicConfig::default());
        let ctx = spec.context(SecretString::from("ak".to_string()));
        let headers = spec.build_headers(&ctx).unwrap();
        assert_eq!(headers.get("x-api-key").unwrap(), "ak");
        assert_eq!(headers.get("anthropic-version").unwrap(), "2023-06-01");

        let payload =
            ProviderPayload::new(ProviderType::Anthropic, "claude", serde_json::json!({}));
        assert_eq!(
            spec.request_url(&payload, &ctx),
            "https://api.anthropic.com/v1/messages"
        );
    }
}
