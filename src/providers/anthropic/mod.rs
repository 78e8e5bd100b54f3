//! Anthropic provider

pub mod spec;
pub mod transformers;

pub use spec::AnthropicSpec;
pub use transformers::AnthropicPayloadBuilder;
