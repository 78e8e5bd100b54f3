//! Response projections
//!
//! [`dispatch`](crate::Dispatcher::dispatch) returns the provider's body
//! unmodified. The functions here are pure, stateless views over that body.

use base64::Engine;
use serde_json::Value;

use crate::error::LlmError;
use crate::types::ProviderType;

/// Raw provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub provider: ProviderType,
    /// HTTP status of the provider call
    pub status: u16,
    /// Response body exactly as returned
    pub raw: Value,
}

impl ProviderResponse {
    /// Plain text of the response, if any.
    pub fn text(&self) -> Option<String> {
        extract_text(self.provider, &self.raw)
    }

    /// Binary parts of a Gemini response.
    pub fn inline_outputs(&self) -> Result<Vec<InlineOutput>, LlmError> {
        extract_inline_outputs(&self.raw)
    }
}

/// Plain text from a raw provider response.
///
/// - OpenAI: `output_text`, or the `output_text` items of `output[].content[]`
/// - Gemini: text parts of every candidate
/// - Anthropic: `text` blocks of `content[]`
///
/// Returns `None` when the body has no text at all.
pub fn extract_text(provider: ProviderType, raw: &Value) -> Option<String> {
    let texts: Vec<&str> = match provider {
        ProviderType::OpenAi => {
            if let Some(text) = raw.get("output_text").and_then(Value::as_str) {
                vec![text]
            } else {
                array(raw, "output")
                    .flat_map(|item| array(item, "content"))
                    .filter(|c| c.get("type").and_then(Value::as_str) == Some("output_text"))
                    .filter_map(|c| c.get("text").and_then(Value::as_str))
                    .collect()
            }
        }
        ProviderType::Gemini => array(raw, "candidates")
            .filter_map(|c| c.get("content"))
            .flat_map(|content| array(content, "parts"))
            .filter_map(|p| p.get("text").and_then(Value::as_str))
            .collect(),
        ProviderType::Anthropic => array(raw, "content")
            .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
            .filter_map(|b| b.get("text").and_then(Value::as_str))
            .collect(),
    };

    let joined = texts
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    (!joined.is_empty()).then_some(joined)
}

fn array<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// Decoded binary part of a Gemini response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineOutput {
    pub candidate_index: usize,
    pub part_index: usize,
    pub mime_type: String,
    pub data: Vec<u8>,
    /// `output_c{candidate}_p{part}.{ext}`; writing it anywhere is up to the caller
    pub suggested_filename: String,
}

/// Decode every `inline_data` (or `inlineData`) part of a Gemini response.
pub fn extract_inline_outputs(raw: &Value) -> Result<Vec<InlineOutput>, LlmError> {
    let mut outputs = Vec::new();
    for (candidate_index, candidate) in array(raw, "candidates").enumerate() {
        let Some(content) = candidate.get("content") else {
            continue;
        };
        for (part_index, part) in array(content, "parts").enumerate() {
            let Some(blob) = part.get("inline_data").or_else(|| part.get("inlineData")) else {
                continue;
            };
            let mime_type = blob
                .get("mime_type")
                .or_else(|| blob.get("mimeType"))
                .and_then(Value::as_str)
                .unwrap_or(crate::defaults::attachment::GENERIC_MIME_TYPE)
                .to_string();
            let encoded = blob.get("data").and_then(Value::as_str).unwrap_or_default();
            let data = base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map_err(|e| {
                    LlmError::ParseError(format!(
                        "Invalid base64 in candidate {candidate_index} part {part_index}: {e}"
                    ))
                })?;
            outputs.push(InlineOutput {
                candidate_index,
                part_index,
                suggested_filename: format!(
                    "output_c{candidate_index}_p{part_index}.{}",
                    extension_for(&mime_type)
                ),
                mime_type,
                data,
            });
        }
    }
    Ok(outputs)
}

/// File extension for a MIME type; `bin` when unknown.
pub fn extension_for(mime_type: &str) -> &'static str {
    let Some(extensions) = mime_guess::get_mime_extensions_str(mime_type) else {
        return "bin";
    };
    let subtype = mime_type.split('/').nth(1).unwrap_or_default();
    extensions
        .iter()
        .find(|ext| ext.eq_ignore_ascii_case(subtype))
        .or_else(|| extensions.first())
        .copied()
        .unwrap_or("bin")
}
