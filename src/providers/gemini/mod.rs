//! Google Gemini provider

pub mod spec;
pub mod transformers;
pub mod types;

pub use spec::GeminiSpec;
pub use transformers::GeminiPayloadBuilder;
