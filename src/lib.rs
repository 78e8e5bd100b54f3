//! # llm-dispatch
//!
//! Send a prompt plus one optional attachment (image, PDF, text or arbitrary
//! blob) to OpenAI, Gemini or Anthropic through a single call.
//!
//! ## What it handles
//!
//! - **Attachment ingestion**: a path, an in-memory buffer or any `Read + Seek`
//!   stream becomes one canonical in-memory attachment; streams are put back
//!   where they were so they can be reused.
//! - **Media classification**: explicit hint, then filename extension, then
//!   magic bytes for unnamed buffers; unknown types degrade to
//!   `application/octet-stream`.
//! - **Provider payloads**: each provider gets its own content-block shape,
//!   with the prompt always last and the system instruction placed where the
//!   provider expects it.
//! - **Upload lifecycle**: OpenAI documents are uploaded, referenced by id and
//!   deleted after the call on every exit path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llm_dispatch::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dispatcher = Dispatcher::builder()
//!         .credentials(std::sync::Arc::new(EnvCredentials))
//!         .build();
//!
//!     let params = RequestParameters::builder(ProviderType::Anthropic, "Summarize this report")
//!         .system_instruction("Answer in three bullet points")
//!         .build();
//!
//!     let response = dispatcher
//!         .dispatch(&params, AttachmentInput::new().path("report.pdf"))
//!         .await?;
//!     println!("{}", response.text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod attachment;
pub mod config;
pub mod core;
pub mod credentials;
pub mod defaults;
pub mod dispatcher;
pub mod error;
pub mod execution;
pub mod files;
pub mod providers;
pub mod response;
pub mod telemetry;
pub mod transformers;
pub mod types;
pub mod utils;

pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use error::LlmError;

pub mod prelude {
    pub use crate::attachment::AttachmentInput;
    pub use crate::config::{
        AnthropicConfig, ConfigOverride, DispatcherConfig, GeminiConfig, OpenAiConfig,
    };
    pub use crate::credentials::{CredentialProvider, EnvCredentials, StaticCredentials};
    pub use crate::dispatcher::{Dispatcher, DispatcherBuilder};
    pub use crate::error::{ErrorCategory, LlmError};
    pub use crate::execution::{HttpTransport, ReqwestTransport};
    pub use crate::response::{InlineOutput, ProviderResponse, extract_inline_outputs, extract_text};
    pub use crate::types::{
        CanonicalAttachment, MediaKind, ProviderType, RequestParameters, SamplingParams,
    };
}
