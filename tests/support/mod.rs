//! Shared test doubles: a recording transport with scripted responses.
#![allow(dead_code)]

use async_trait::async_trait;
use llm_dispatch::credentials::StaticCredentials;
use llm_dispatch::execution::{
    HttpDeleteRequest, HttpMultipartRequest, HttpTransport, HttpTransportRequest,
    HttpTransportResponse,
};
use llm_dispatch::prelude::*;
use reqwest::header::HeaderMap;
use std::sync::{Arc, Mutex};

/// One observed transport call.
#[derive(Debug, Clone)]
pub enum Call {
    Json(HttpTransportRequest),
    Multipart(HttpMultipartRequest),
    Delete(HttpDeleteRequest),
}

impl Call {
    pub fn kind(&self) -> &'static str {
        match self {
            Call::Json(_) => "json",
            Call::Multipart(_) => "upload",
            Call::Delete(_) => "delete",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Call::Json(r) => &r.url,
            Call::Multipart(r) => &r.url,
            Call::Delete(r) => &r.url,
        }
    }
}

/// Scripted reply for one kind of call.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, serde_json::Value),
    Text(u16, String),
    TransportError(String),
}

impl Reply {
    fn into_result(self) -> Result<HttpTransportResponse, LlmError> {
        let (status, body) = match self {
            Reply::Status(status, json) => (status, serde_json::to_vec(&json).expect("json bytes")),
            Reply::Text(status, text) => (status, text.into_bytes()),
            Reply::TransportError(msg) => return Err(LlmError::HttpError(msg)),
        };
        Ok(HttpTransportResponse {
            status,
            headers: HeaderMap::new(),
            body,
        })
    }
}

#[derive(Clone)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    json_reply: Arc<Mutex<Reply>>,
    upload_reply: Arc<Mutex<Reply>>,
    delete_reply: Arc<Mutex<Reply>>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self {
            calls: Arc::default(),
            json_reply: Arc::new(Mutex::new(Reply::Status(
                200,
                serde_json::json!({ "output_text": "ok" }),
            ))),
            upload_reply: Arc::new(Mutex::new(Reply::Status(
                200,
                serde_json::json!({ "id": "file-abc123", "object": "file" }),
            ))),
            delete_reply: Arc::new(Mutex::new(Reply::Status(
                200,
                serde_json::json!({ "id": "file-abc123", "deleted": true }),
            ))),
        }
    }
}

impl RecordingTransport {
    pub fn with_json_reply(self, reply: Reply) -> Self {
        *self.json_reply.lock().expect("lock") = reply;
        self
    }

    pub fn with_upload_reply(self, reply: Reply) -> Self {
        *self.upload_reply.lock().expect("lock") = reply;
        self
    }

    pub fn with_delete_reply(self, reply: Reply) -> Self {
        *self.delete_reply.lock().expect("lock") = reply;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.calls().iter().map(Call::kind).collect()
    }

    /// Body of the single JSON call.
    pub fn json_body(&self) -> serde_json::Value {
        let bodies: Vec<_> = self
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Json(r) => Some(r.body),
                _ => None,
            })
            .collect();
        assert_eq!(bodies.len(), 1, "expected exactly one JSON call");
        bodies.into_iter().next().expect("one body")
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("lock").push(call);
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        self.record(Call::Json(request));
        self.json_reply.lock().expect("lock").clone().into_result()
    }

    async fn execute_multipart(
        &self,
        request: HttpMultipartRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        self.record(Call::Multipart(request));
        self.upload_reply.lock().expect("lock").clone().into_result()
    }

    async fn execute_delete(
        &self,
        request: HttpDeleteRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        self.record(Call::Delete(request));
        self.delete_reply.lock().expect("lock").clone().into_result()
    }
}

/// Credentials for every provider.
pub fn test_credentials() -> Arc<StaticCredentials> {
    Arc::new(
        StaticCredentials::new()
            .with_key(ProviderType::OpenAi, "sk-test")
            .with_key(ProviderType::Gemini, "g-test")
            .with_key(ProviderType::Anthropic, "ak-test"),
    )
}

/// Dispatcher wired to `transport` with test credentials.
pub fn dispatcher(transport: &RecordingTransport) -> Dispatcher {
    Dispatcher::builder()
        .transport(Arc::new(transport.clone()))
        .credentials(test_credentials())
        .build()
}

/// Minimal JPEG signature followed by padding.
pub fn jpeg_bytes() -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];
    bytes.extend_from_slice(&[0u8; 32]);
    bytes
}

pub fn pdf_bytes() -> Vec<u8> {
    b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\ntrailer\n%%EOF\n".to_vec()
}
