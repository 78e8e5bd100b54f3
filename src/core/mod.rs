//! Provider abstraction shared by the dispatcher and every provider module

pub mod provider_spec;

pub use provider_spec::{ProviderCapabilities, ProviderContext, ProviderSpec};
