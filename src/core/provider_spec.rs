//! Provider Specification
//!
//! A [`ProviderSpec`] concentrates everything the dispatcher needs to know
//! about one vendor:
//! - how to authenticate (headers)
//! - where to send the request (route URL)
//! - how to shape the body (its [`PayloadBuilder`])
//! - which media types must be uploaded before they can be referenced, and the
//!   [`FileStore`] that does it
//!
//! New providers are added as new specs; the dispatcher never branches on the
//! provider identifier itself.

use reqwest::header::HeaderMap;
use secrecy::SecretString;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::LlmError;
use crate::execution::HttpTransport;
use crate::files::FileStore;
use crate::transformers::PayloadBuilder;
use crate::types::{ProviderPayload, ProviderType};

/// Per-call provider context: resolved credentials plus connection settings.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    pub provider: ProviderType,
    pub base_url: String,
    pub api_key: SecretString,
    pub http_extra_headers: HashMap<String, String>,
    pub organization: Option<String>,
    pub project: Option<String>,
}

impl ProviderContext {
    pub fn new(
        provider: ProviderType,
        base_url: impl Into<String>,
        api_key: SecretString,
        http_extra_headers: HashMap<String, String>,
    ) -> Self {
        Self {
            provider,
            base_url: base_url.into(),
            api_key,
            http_extra_headers,
            organization: None,
            project: None,
        }
    }

    pub fn with_org_project(mut self, org: Option<String>, project: Option<String>) -> Self {
        self.organization = org;
        self.project = project;
        self
    }
}

/// Attachment handling capabilities of a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCapabilities {
    /// MIME types that must be uploaded and referenced by id
    pub upload_media_types: Vec<String>,
    /// Whether PDFs can travel inline in the request body
    pub inline_documents: bool,
}

impl ProviderCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_upload_media_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.upload_media_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_inline_documents(mut self) -> Self {
        self.inline_documents = true;
        self
    }

    /// Whether an attachment of `mime_type` must be uploaded first.
    pub fn requires_upload(&self, mime_type: &str) -> bool {
        let mime = mime_type.trim();
        self.upload_media_types
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(mime))
    }
}

/// Provider Specification: header building, routing, payload shaping and
/// file storage for one vendor.
pub trait ProviderSpec: Send + Sync {
    fn id(&self) -> ProviderType;

    fn capabilities(&self) -> ProviderCapabilities;

    /// Resolve connection settings for a call with the given key.
    fn context(&self, api_key: SecretString) -> ProviderContext;

    /// JSON request headers (auth + custom).
    fn build_headers(&self, ctx: &ProviderContext) -> Result<HeaderMap, LlmError>;

    /// Route for the main generation request.
    fn request_url(&self, payload: &ProviderPayload, ctx: &ProviderContext) -> String;

    fn payload_builder(&self) -> &dyn PayloadBuilder;

    /// Out-of-band file storage, for providers that require pre-upload.
    fn file_store(
        &self,
        _ctx: &ProviderContext,
        _transport: Arc<dyn HttpTransport>,
    ) -> Option<Arc<dyn FileStore>> {
        None
    }
}
