//! Request dispatcher
//!
//! Orchestrates one call end to end:
//!
//! 1. validate that at most one attachment origin was supplied
//! 2. adapt the source into a [`CanonicalAttachment`]
//! 3. upload it when the provider requires that for its media type
//! 4. build the provider payload
//! 5. send it; non-success statuses become `ApiError`
//! 6. delete the upload, whatever happened in 4 and 5
//!
//! The dispatcher holds no per-call state, so one instance can serve
//! concurrent calls.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;

use crate::attachment::{AttachmentInput, adapt};
use crate::config::DispatcherConfig;
use crate::core::{ProviderContext, ProviderSpec};
use crate::credentials::{CredentialProvider, EnvCredentials};
use crate::error::LlmError;
use crate::execution::{HttpTransport, HttpTransportRequest, ReqwestTransport};
use crate::files::with_uploaded;
use crate::providers::spec_for;
use crate::response::ProviderResponse;
use crate::types::{CanonicalAttachment, ProviderType, RequestParameters};

/// Provider-agnostic request dispatcher.
#[derive(Clone)]
pub struct Dispatcher {
    config: Arc<DispatcherConfig>,
    specs: HashMap<ProviderType, Arc<dyn ProviderSpec>>,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Default configuration, reqwest transport and environment credentials.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    fn spec(&self, provider: ProviderType) -> Result<&Arc<dyn ProviderSpec>, LlmError> {
        self.specs.get(&provider).ok_or_else(|| {
            LlmError::UnsupportedOperation(format!("No provider spec registered for {provider}"))
        })
    }

    /// Send `params` with an optional attachment and return the raw response.
    pub async fn dispatch(
        &self,
        params: &RequestParameters,
        attachment: AttachmentInput<'_>,
    ) -> Result<ProviderResponse, LlmError> {
        let provider = params.provider();
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!(
            target: "llm_dispatch::dispatcher",
            "dispatch",
            provider = %provider,
            request_id = %request_id,
        );
        self.dispatch_inner(params, attachment).instrument(span).await
    }

    async fn dispatch_inner(
        &self,
        params: &RequestParameters,
        attachment: AttachmentInput<'_>,
    ) -> Result<ProviderResponse, LlmError> {
        let source = attachment.into_source()?;
        let attachment = source
            .map(|(source, hints)| adapt(source, &hints))
            .transpose()?;

        let spec = self.spec(params.provider())?;
        let api_key = self.credentials.api_key(spec.id())?;
        let ctx = spec.context(api_key);

        let upload_store = match &attachment {
            Some(att) if spec.capabilities().requires_upload(att.mime_type()) => {
                spec.file_store(&ctx, self.transport.clone())
            }
            _ => None,
        };

        match (attachment, upload_store) {
            (Some(att), Some(store)) => {
                tracing::debug!(
                    target: "llm_dispatch::dispatcher",
                    mime_type = att.mime_type(),
                    "attachment requires pre-upload"
                );
                let spec = spec.as_ref();
                let ctx = &ctx;
                with_uploaded(store, att, |att| async move {
                    self.send(spec, ctx, params, Some(&att)).await
                })
                .await
            }
            (att, _) => self.send(spec.as_ref(), &ctx, params, att.as_ref()).await,
        }
    }

    async fn send(
        &self,
        spec: &dyn ProviderSpec,
        ctx: &ProviderContext,
        params: &RequestParameters,
        attachment: Option<&CanonicalAttachment>,
    ) -> Result<ProviderResponse, LlmError> {
        let payload = spec.payload_builder().build(params, attachment)?;
        let request = HttpTransportRequest {
            url: spec.request_url(&payload, ctx),
            headers: spec.build_headers(ctx)?,
            body: payload.body,
        };

        tracing::debug!(
            target: "llm_dispatch::dispatcher",
            url = %request.url,
            model = %payload.model,
            "sending provider request"
        );
        let response = self.transport.execute_json(request).await?;

        if !response.is_success() {
            tracing::debug!(
                target: "llm_dispatch::dispatcher",
                status = response.status,
                "provider returned an error status"
            );
            return Err(LlmError::api_error(response.status, response.text()));
        }

        Ok(ProviderResponse {
            provider: spec.id(),
            status: response.status,
            raw: response.json()?,
        })
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    config: Option<DispatcherConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl DispatcherBuilder {
    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Custom transport; defaults to [`ReqwestTransport`].
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Credential source; defaults to [`EnvCredentials`].
    pub fn credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn build(self) -> Dispatcher {
        let config = self.config.unwrap_or_default();
        let specs = ProviderType::ALL
            .into_iter()
            .map(|p| (p, spec_for(p, &config)))
            .collect();
        Dispatcher {
            config: Arc::new(config),
            specs,
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(ReqwestTransport::default())),
            credentials: self
                .credentials
                .unwrap_or_else(|| Arc::new(EnvCredentials)),
        }
    }
}
