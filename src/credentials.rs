//! API key resolution
//!
//! Reading key files from disk is left to the application; the dispatcher only
//! asks a [`CredentialProvider`] for the key of the provider it is about to call.

use secrecy::SecretString;
use std::collections::HashMap;

use crate::error::LlmError;
use crate::types::ProviderType;

/// Yields an API key per provider.
pub trait CredentialProvider: Send + Sync {
    fn api_key(&self, provider: ProviderType) -> Result<SecretString, LlmError>;
}

/// Fixed in-memory keys.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    keys: HashMap<ProviderType, SecretString>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key for `provider`, replacing any previous one.
    pub fn with_key(mut self, provider: ProviderType, key: impl Into<String>) -> Self {
        self.keys
            .insert(provider, SecretString::from(key.into()));
        self
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("providers", &self.keys.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self, provider: ProviderType) -> Result<SecretString, LlmError> {
        self.keys
            .get(&provider)
            .cloned()
            .ok_or_else(|| LlmError::MissingApiKey(format!("No API key configured for {provider}")))
    }
}

/// Keys from environment variables.
///
/// | provider  | variables                            |
/// |-----------|--------------------------------------|
/// | openai    | `OPENAI_API_KEY`                     |
/// | gemini    | `GEMINI_API_KEY`, `GOOGLE_API_KEY`   |
/// | anthropic | `ANTHROPIC_API_KEY`                  |
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    /// Variables consulted for `provider`, in priority order.
    pub fn variables(provider: ProviderType) -> &'static [&'static str] {
        match provider {
            ProviderType::OpenAi => &["OPENAI_API_KEY"],
            ProviderType::Gemini => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
            ProviderType::Anthropic => &["ANTHROPIC_API_KEY"],
        }
    }
}

impl CredentialProvider for EnvCredentials {
    fn api_key(&self, provider: ProviderType) -> Result<SecretString, LlmError> {
        let vars = Self::variables(provider);
        vars.iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .map(SecretString::from)
            .ok_or_else(|| {
                LlmError::MissingApiKey(format!(
                    "No API key for {provider}; set {}",
                    vars.join(" or ")
                ))
            })
    }
}
