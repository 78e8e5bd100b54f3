//! OpenAI provider
//!
//! Responses API payloads plus the Files API store used for documents.

pub mod files;
pub mod spec;
pub mod transformers;

pub use files::OpenAiFiles;
pub use spec::OpenAiSpec;
pub use transformers::OpenAiPayloadBuilder;
