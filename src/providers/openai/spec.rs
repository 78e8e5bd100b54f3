use reqwest::header::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;

use super::files::OpenAiFiles;
use super::transformers::OpenAiPayloadBuilder;
use crate::config::OpenAiConfig;
use crate::core::{ProviderCapabilities, ProviderContext, ProviderSpec};
use crate::error::LlmError;
use crate::execution::HttpTransport;
use crate::files::FileStore;
use crate::transformers::PayloadBuilder;
use crate::types::{ProviderPayload, ProviderType};
use crate::utils::http_headers::ProviderHeaders;
use crate::utils::join_url;

/// OpenAI ProviderSpec implementation
///
/// The only spec with a file store: media types on the configured upload list
/// go through the Files API and are referenced by id.
#[derive(Debug, Clone)]
pub struct OpenAiSpec {
    config: OpenAiConfig,
    builder: OpenAiPayloadBuilder,
}

impl OpenAiSpec {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            builder: OpenAiPayloadBuilder::new(config.clone()),
            config,
        }
    }
}

impl ProviderSpec for OpenAiSpec {
    fn id(&self) -> ProviderType {
        ProviderType::OpenAi
    }

    fn capabilities(&self) -> ProviderCapabilities {
        let caps = ProviderCapabilities::new()
            .with_upload_media_types(self.config.upload_media_types.iter().cloned());
        if caps.requires_upload("application/pdf") {
            caps
        } else {
            caps.with_inline_documents()
        }
    }

    fn context(&self, api_key: SecretString) -> ProviderContext {
        ProviderContext::new(
            ProviderType::OpenAi,
            self.config.base_url.clone(),
            api_key,
            self.config.headers.clone(),
        )
        .with_org_project(self.config.organization.clone(), self.config.project.clone())
    }

    fn build_headers(&self, ctx: &ProviderContext) -> Result<HeaderMap, LlmError> {
        ProviderHeaders::openai(
            ctx.api_key.expose_secret(),
            ctx.organization.as_deref(),
            ctx.project.as_deref(),
            &ctx.http_extra_headers,
        )
    }

    fn request_url(&self, _payload: &ProviderPayload, ctx: &ProviderContext) -> String {
        join_url(&ctx.base_url, "responses")
    }

    fn payload_builder(&self) -> &dyn PayloadBuilder {
        &self.builder
    }

    fn file_store(
        &self,
        ctx: &ProviderContext,
        transport: Arc<dyn HttpTransport>,
    ) -> Option<Arc<dyn FileStore>> {
        let files = OpenAiFiles::new(
            transport,
            ctx.base_url.clone(),
            ctx.api_key.clone(),
            self.config.upload_purpose.clone(),
        )
        .with_org_project(ctx.organization.clone(), ctx.project.clone())
        .with_http_extra_headers(ctx.http_extra_headers.clone());
        Some(Arc::new(files))
    }
}
