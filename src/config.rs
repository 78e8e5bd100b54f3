//! Dispatcher configuration
//!
//! All endpoint URLs, model names, sampling defaults and provider quirks live
//! in one immutable [`DispatcherConfig`] handed to the dispatcher at
//! construction time. Tests and applications adjust it through the named
//! [`ConfigOverride`] points rather than process-wide state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::defaults;
use crate::types::{ProviderType, SamplingParams};

/// Provider-level sampling defaults, used where a call leaves a knob unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingDefaults {
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    /// `None` for providers without top-k sampling
    pub top_k: Option<u32>,
    /// `None` for providers without multiple candidates
    pub candidate_count: Option<u32>,
}

impl Default for SamplingDefaults {
    fn default() -> Self {
        Self {
            max_tokens: defaults::sampling::MAX_TOKENS,
            temperature: 1.0,
            top_p: 1.0,
            top_k: None,
            candidate_count: None,
        }
    }
}

/// Sampling values after merging call parameters over provider defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSampling {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: Option<u32>,
    pub candidate_count: Option<u32>,
}

impl SamplingDefaults {
    /// Merge per-call parameters over these defaults.
    pub fn resolve(&self, default_model: &str, params: &SamplingParams) -> ResolvedSampling {
        ResolvedSampling {
            model: params
                .model
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| default_model.to_string()),
            max_tokens: params.max_tokens.unwrap_or(self.max_tokens),
            temperature: params.temperature.unwrap_or(self.temperature),
            top_p: params.top_p.unwrap_or(self.top_p),
            top_k: params.top_k.or(self.top_k),
            candidate_count: params.candidate_count.or(self.candidate_count),
        }
    }
}

/// OpenAI Responses API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub sampling: SamplingDefaults,
    /// `purpose` sent with Files API uploads
    pub upload_purpose: String,
    /// MIME types uploaded through the Files API and referenced by id
    pub upload_media_types: Vec<String>,
    pub headers: HashMap<String, String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::openai::BASE_URL.to_string(),
            model: defaults::openai::MODEL.to_string(),
            organization: None,
            project: None,
            sampling: SamplingDefaults {
                temperature: defaults::openai::TEMPERATURE,
                top_p: defaults::openai::TOP_P,
                ..SamplingDefaults::default()
            },
            upload_purpose: defaults::openai::UPLOAD_PURPOSE.to_string(),
            upload_media_types: defaults::openai::UPLOAD_MEDIA_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            headers: HashMap::new(),
        }
    }
}

impl OpenAiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn with_upload_media_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.upload_media_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Gemini `generateContent` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_version: String,
    pub model: String,
    pub sampling: SamplingDefaults,
    /// Threshold applied to every entry of `safety_categories`
    pub safety_threshold: String,
    pub safety_categories: Vec<String>,
    pub headers: HashMap<String, String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::gemini::BASE_URL.to_string(),
            api_version: defaults::gemini::API_VERSION.to_string(),
            model: defaults::gemini::MODEL.to_string(),
            sampling: SamplingDefaults {
                temperature: defaults::gemini::TEMPERATURE,
                top_p: defaults::gemini::TOP_P,
                top_k: Some(defaults::gemini::TOP_K),
                candidate_count: Some(defaults::gemini::CANDIDATE_COUNT),
                ..SamplingDefaults::default()
            },
            safety_threshold: defaults::gemini::SAFETY_THRESHOLD.to_string(),
            safety_categories: defaults::gemini::SAFETY_CATEGORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            headers: HashMap::new(),
        }
    }
}

impl GeminiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_safety_threshold(mut self, threshold: impl Into<String>) -> Self {
        self.safety_threshold = threshold.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Anthropic Messages API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicConfig {
    pub base_url: String,
    pub model: String,
    /// Value of the `anthropic-version` header
    pub api_version: String,
    pub sampling: SamplingDefaults,
    pub headers: HashMap<String, String>,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::anthropic::BASE_URL.to_string(),
            model: defaults::anthropic::MODEL.to_string(),
            api_version: defaults::anthropic::API_VERSION.to_string(),
            sampling: SamplingDefaults {
                temperature: defaults::anthropic::TEMPERATURE,
                top_p: defaults::anthropic::TOP_P,
                top_k: Some(defaults::anthropic::TOP_K),
                ..SamplingDefaults::default()
            },
            headers: HashMap::new(),
        }
    }
}

impl AnthropicConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Named override points for [`DispatcherConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigOverride {
    BaseUrl(ProviderType, String),
    Model(ProviderType, String),
    MaxTokens(ProviderType, u32),
    Temperature(ProviderType, f64),
    TopP(ProviderType, f64),
    /// Ignored for OpenAI, which has no top-k sampling
    TopK(ProviderType, u32),
    /// Gemini only
    CandidateCount(u32),
    /// Gemini only
    SafetyThreshold(String),
    /// Gemini URL version segment or Anthropic `anthropic-version` header
    ApiVersion(ProviderType, String),
    /// OpenAI only
    UploadPurpose(String),
    /// OpenAI only
    UploadMediaTypes(Vec<String>),
}

/// Immutable configuration for every provider the dispatcher can reach.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub openai: OpenAiConfig,
    pub gemini: GeminiConfig,
    pub anthropic: AnthropicConfig,
}

impl DispatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_openai(mut self, config: OpenAiConfig) -> Self {
        self.openai = config;
        self
    }

    pub fn with_gemini(mut self, config: GeminiConfig) -> Self {
        self.gemini = config;
        self
    }

    pub fn with_anthropic(mut self, config: AnthropicConfig) -> Self {
        self.anthropic = config;
        self
    }

    /// Apply a single override.
    pub fn with_override(mut self, item: ConfigOverride) -> Self {
        match item {
            ConfigOverride::BaseUrl(p, url) => *self.base_url_mut(p) = url,
            ConfigOverride::Model(p, model) => *self.model_mut(p) = model,
            ConfigOverride::MaxTokens(p, v) => self.sampling_mut(p).max_tokens = v,
            ConfigOverride::Temperature(p, v) => self.sampling_mut(p).temperature = v,
            ConfigOverride::TopP(p, v) => self.sampling_mut(p).top_p = v,
            ConfigOverride::TopK(p, v) => {
                if p != ProviderType::OpenAi {
                    self.sampling_mut(p).top_k = Some(v);
                }
            }
            ConfigOverride::CandidateCount(v) => self.gemini.sampling.candidate_count = Some(v),
            ConfigOverride::SafetyThreshold(t) => self.gemini.safety_threshold = t,
            ConfigOverride::ApiVersion(p, v) => match p {
                ProviderType::Gemini => self.gemini.api_version = v,
                ProviderType::Anthropic => self.anthropic.api_version = v,
                ProviderType::OpenAi => {}
            },
            ConfigOverride::UploadPurpose(purpose) => self.openai.upload_purpose = purpose,
            ConfigOverride::UploadMediaTypes(types) => self.openai.upload_media_types = types,
        }
        self
    }

    /// Apply overrides in order; later entries win.
    pub fn with_overrides(self, items: impl IntoIterator<Item = ConfigOverride>) -> Self {
        items.into_iter().fold(self, Self::with_override)
    }

    pub fn base_url(&self, provider: ProviderType) -> &str {
        match provider {
            ProviderType::OpenAi => &self.openai.base_url,
            ProviderType::Gemini => &self.gemini.base_url,
            ProviderType::Anthropic => &self.anthropic.base_url,
        }
    }

    fn base_url_mut(&mut self, provider: ProviderType) -> &mut String {
        match provider {
            ProviderType::OpenAi => &mut self.openai.base_url,
            ProviderType::Gemini => &mut self.gemini.base_url,
            ProviderType::Anthropic => &mut self.anthropic.base_url,
        }
    }

    fn model_mut(&mut self, provider: ProviderType) -> &mut String {
        match provider {
            ProviderType::OpenAi => &mut self.openai.model,
            ProviderType::Gemini => &mut self.gemini.model,
            ProviderType::Anthropic => &mut self.anthropic.model,
        }
    }

    fn sampling_mut(&mut self, provider: ProviderType) -> &mut SamplingDefaults {
        match provider {
            ProviderType::OpenAi => &mut self.openai.sampling,
            ProviderType::Gemini => &mut self.gemini.sampling,
            ProviderType::Anthropic => &mut self.anthropic.sampling,
        }
    }
}
