//! Provider identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LlmError;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// OpenAI Responses API (pre-uploads documents through the Files API)
    #[serde(rename = "openai")]
    OpenAi,
    /// Google Gemini `generateContent` (inline data parts)
    Gemini,
    /// Anthropic Messages API (native image/document blocks)
    Anthropic,
}

impl ProviderType {
    /// All supported providers, in a stable order.
    pub const ALL: [ProviderType; 3] = [Self::OpenAi, Self::Gemini, Self::Anthropic];

    /// Stable lowercase identifier.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Anthropic => "anthropic",
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderType {
    type Err = LlmError;

    /// Accepts full names, common aliases and single-letter family codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "o" => Ok(Self::OpenAi),
            "gemini" | "google" | "g" => Ok(Self::Gemini),
            "anthropic" | "claude" | "c" => Ok(Self::Anthropic),
            other => Err(LlmError::ConfigurationError(format!(
                "Unknown provider '{other}'. Expected one of: openai (o), gemini (g), anthropic (c)"
            ))),
        }
    }
}
