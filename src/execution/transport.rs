//! HTTP transport abstraction
//!
//! Provider specs describe requests as plain data (URL, headers, body); an
//! injectable [`HttpTransport`] performs them. Tests substitute a recording
//! transport to observe the final requests without any network access.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use std::time::Duration;

use crate::error::LlmError;

/// Transport-level request data for JSON POST requests.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

/// File part of a multipart upload.
#[derive(Clone)]
pub struct MultipartFile {
    pub field_name: String,
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for MultipartFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultipartFile")
            .field("field_name", &self.field_name)
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Transport-level request data for multipart POST requests.
#[derive(Debug, Clone)]
pub struct HttpMultipartRequest {
    pub url: String,
    pub headers: HeaderMap,
    /// Plain text form fields, sent before the file part
    pub fields: Vec<(String, String)>,
    pub file: MultipartFile,
}

/// Transport-level request data for DELETE requests.
#[derive(Debug, Clone)]
pub struct HttpDeleteRequest {
    pub url: String,
    pub headers: HeaderMap,
}

/// Transport-level response data.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpTransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as lossy UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON.
    pub fn json(&self) -> Result<serde_json::Value, LlmError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| LlmError::ParseError(format!("Invalid JSON response body: {e}")))
    }
}

/// Custom HTTP transport.
///
/// Implementations return the provider's response whatever its status; only
/// failures to obtain a response at all are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, LlmError>;

    async fn execute_multipart(
        &self,
        request: HttpMultipartRequest,
    ) -> Result<HttpTransportResponse, LlmError>;

    async fn execute_delete(
        &self,
        request: HttpDeleteRequest,
    ) -> Result<HttpTransportResponse, LlmError>;
}

/// Default transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Per-request timeout applied on top of the client's own settings.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn apply_timeout(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.timeout {
            Some(t) => builder.timeout(t),
            None => builder,
        }
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<HttpTransportResponse, LlmError> {
        let response = self
            .apply_timeout(builder)
            .send()
            .await
            .map_err(|e| LlmError::HttpError(format!("Request failed: {e}")))?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| LlmError::HttpError(format!("Failed to read response body: {e}")))?;
        Ok(HttpTransportResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute_json(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        let builder = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .json(&request.body);
        self.send(builder).await
    }

    async fn execute_multipart(
        &self,
        request: HttpMultipartRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        let mut headers = request.headers;
        // reqwest sets the boundary-bearing content type itself
        headers.remove(CONTENT_TYPE);

        let file = request.file;
        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.filename)
            .mime_str(&file.mime_type)
            .map_err(|e| {
                LlmError::ConfigurationError(format!(
                    "Invalid MIME type '{}' for upload: {e}",
                    file.mime_type
                ))
            })?;
        let form = request
            .fields
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (k, v)| {
                form.text(k, v)
            })
            .part(file.field_name, part);

        let builder = self
            .client
            .post(&request.url)
            .headers(headers)
            .multipart(form);
        self.send(builder).await
    }

    async fn execute_delete(
        &self,
        request: HttpDeleteRequest,
    ) -> Result<HttpTransportResponse, LlmError> {
        let builder = self.client.delete(&request.url).headers(request.headers);
        self.send(builder).await
    }
}
