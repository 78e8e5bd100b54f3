//! Provider implementations
//!
//! One module per vendor, each exposing a [`ProviderSpec`] and its payload
//! builder. [`spec_for`] is the only place that maps identifiers to specs.

pub mod anthropic;
pub mod gemini;
pub mod openai;

use std::sync::Arc;

use crate::config::DispatcherConfig;
use crate::core::ProviderSpec;
use crate::types::ProviderType;

pub use anthropic::AnthropicSpec;
pub use gemini::GeminiSpec;
pub use openai::OpenAiSpec;

/// Build the spec for `provider` from its section of `config`.
pub fn spec_for(provider: ProviderType, config: &DispatcherConfig) -> Arc<dyn ProviderSpec> {
    match provider {
        ProviderType::OpenAi => Arc::new(OpenAiSpec::new(config.openai.clone())),
        ProviderType::Gemini => Arc::new(GeminiSpec::new(config.gemini.clone())),
        ProviderType::Anthropic => Arc::new(AnthropicSpec::new(config.anthropic.clone())),
    }
}
