//! Per-call request parameters

use serde::{Deserialize, Serialize};

use super::provider::ProviderType;

/// Sampling knobs forwarded to the provider.
///
/// Unset fields fall back to the provider defaults in the dispatcher config.
/// Values are not range-checked; the provider reports out-of-range values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Model override for this call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum output tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Ignored by providers without top-k sampling (OpenAI)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Gemini only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<u32>,
}

/// Immutable inputs of a single dispatch call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParameters {
    provider: ProviderType,
    prompt: String,
    system_instruction: Option<String>,
    sampling: SamplingParams,
}

impl RequestParameters {
    /// Start building parameters for `provider` with the given prompt.
    pub fn builder(provider: ProviderType, prompt: impl Into<String>) -> RequestParametersBuilder {
        RequestParametersBuilder {
            provider,
            prompt: prompt.into(),
            system_instruction: None,
            sampling: SamplingParams::default(),
        }
    }

    pub fn provider(&self) -> ProviderType {
        self.provider
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// System instruction; blank instructions are reported as absent.
    pub fn system_instruction(&self) -> Option<&str> {
        self.system_instruction
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn sampling(&self) -> &SamplingParams {
        &self.sampling
    }
}

/// Builder for [`RequestParameters`].
#[derive(Debug, Clone)]
pub struct RequestParametersBuilder {
    provider: ProviderType,
    prompt: String,
    system_instruction: Option<String>,
    sampling: SamplingParams,
}

impl RequestParametersBuilder {
    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.sampling.model = Some(model.into());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.sampling.max_tokens = Some(max_tokens);
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.sampling.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f64) -> Self {
        self.sampling.top_p = Some(top_p);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.sampling.top_k = Some(top_k);
        self
    }

    pub fn candidate_count(mut self, count: u32) -> Self {
        self.sampling.candidate_count = Some(count);
        self
    }

    /// Replace all sampling knobs at once.
    pub fn sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn build(self) -> RequestParameters {
        RequestParameters {
            provider: self.provider,
            prompt: self.prompt,
            system_instruction: self.system_instruction,
            sampling: self.sampling,
        }
    }
}
