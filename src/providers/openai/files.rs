//! OpenAI Files API
//!
//! Upload (`POST /files`, multipart) and delete (`DELETE /files/{id}`) are the
//! only operations the dispatcher needs: documents are uploaded right before
//! the Responses call that references them and deleted right after.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::LlmError;
use crate::execution::{HttpDeleteRequest, HttpMultipartRequest, HttpTransport, MultipartFile};
use crate::files::FileStore;
use crate::types::{CanonicalAttachment, ProviderType, UploadedFileHandle};
use crate::utils::http_headers::ProviderHeaders;
use crate::utils::join_url;

/// `OpenAI` file storage backed by an [`HttpTransport`].
#[derive(Clone)]
pub struct OpenAiFiles {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    api_key: SecretString,
    organization: Option<String>,
    project: Option<String>,
    http_extra_headers: HashMap<String, String>,
    purpose: String,
}

impl OpenAiFiles {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        api_key: SecretString,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            api_key,
            organization: None,
            project: None,
            http_extra_headers: HashMap::new(),
            purpose: purpose.into(),
        }
    }

    pub fn with_org_project(mut self, org: Option<String>, project: Option<String>) -> Self {
        self.organization = org;
        self.project = project;
        self
    }

    pub fn with_http_extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.http_extra_headers = headers;
        self
    }

    fn files_url(&self) -> String {
        join_url(&self.base_url, "files")
    }

    fn file_url(&self, file_id: &str) -> String {
        join_url(&self.base_url, &format!("files/{file_id}"))
    }
}

#[async_trait]
impl FileStore for OpenAiFiles {
    async fn upload(
        &self,
        attachment: &CanonicalAttachment,
    ) -> Result<UploadedFileHandle, LlmError> {
        let headers = ProviderHeaders::openai_multipart(
            self.api_key.expose_secret(),
            self.organization.as_deref(),
            self.project.as_deref(),
            &self.http_extra_headers,
        )?;
        let request = HttpMultipartRequest {
            url: self.files_url(),
            headers,
            fields: vec![("purpose".to_string(), self.purpose.clone())],
            file: MultipartFile {
                field_name: "file".to_string(),
                filename: attachment.filename().to_string(),
                mime_type: attachment.mime_type().to_string(),
                bytes: attachment.bytes().to_vec(),
            },
        };

        let response = self
            .transport
            .execute_multipart(request)
            .await
            .map_err(|e| LlmError::UploadError {
                status: None,
                message: e.to_string(),
            })?;

        if !response.is_success() {
            return Err(LlmError::UploadError {
                status: Some(response.status),
                message: response.text(),
            });
        }

        let id = response
            .json()
            .ok()
            .and_then(|v| v.get("id").and_then(|id| id.as_str()).map(str::to_string))
            .filter(|id| !id.is_empty())
            .ok_or_else(|| LlmError::UploadError {
                status: Some(response.status),
                message: format!("Upload response carried no file id: {}", response.text()),
            })?;

        tracing::debug!(
            target: "llm_dispatch::openai::files",
            file_id = %id,
            filename = attachment.filename(),
            size = attachment.len(),
            "uploaded file"
        );
        Ok(UploadedFileHandle::new(ProviderType::OpenAi, id))
    }

    async fn delete(&self, handle: &UploadedFileHandle) -> Result<(), LlmError> {
        let headers = ProviderHeaders::openai(
            self.api_key.expose_secret(),
            self.organization.as_deref(),
            self.project.as_deref(),
            &self.http_extra_headers,
        )?;
        let response = self
            .transport
            .execute_delete(HttpDeleteRequest {
                url: self.file_url(&handle.id),
                headers,
            })
            .await?;

        if !response.is_success() {
            return Err(LlmError::api_error(response.status, response.text()));
        }
        tracing::debug!(
            target: "llm_dispatch::openai::files",
            file_id = %handle.id,
            "deleted file"
        );
        Ok(())
    }
}
