//! Utility modules
//!
//! Small helpers shared by the attachment adapter, payload builders and
//! provider specs.

pub mod http_headers;
pub mod mime;
pub mod url;

pub use url::join_url;
