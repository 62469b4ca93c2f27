//! HTTP Backend Implementation
//!
//! Document-chat backend over HTTP.
//!
//! # Wire Format
//!
//! The server exposes two endpoints under a configurable base URL:
//! - `POST {base}/upload/` — multipart/form-data, one part per file, all
//!   parts named `files`, PDF content type
//! - `POST {base}/ask/` — JSON body `{"question": "..."}`, JSON response
//!   `{"answer": "...", "chat_history": [...]}`
//!
//! File bytes are read from disk at submission time, so nothing is buffered
//! while the user is still staging.

use std::time::Duration;

use async_trait::async_trait;

use super::traits::{AskOutcome, DocumentBackend, TransportError, UploadOutcome};
use crate::config::DocChatConfig;
use crate::documents::{DocumentRef, PDF_MIME};

/// HTTP document-chat backend
#[derive(Clone)]
pub struct HttpBackend {
    /// Server base URL, no trailing slash
    base_url: String,
    /// HTTP client for ask and health-check calls
    http_client: reqwest::Client,
    /// HTTP client for uploads, which carry file payloads and need more time
    upload_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a new HTTP backend.
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        upload_timeout: Duration,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http_client: client_with_timeout(request_timeout),
            upload_client: client_with_timeout(upload_timeout),
        }
    }

    /// Create from loaded configuration
    #[must_use]
    pub fn from_config(config: &DocChatConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.request_timeout,
            config.upload_timeout,
        )
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get upload endpoint URL
    fn upload_url(&self) -> String {
        format!("{}/upload/", self.base_url)
    }

    /// Get ask endpoint URL
    fn ask_url(&self) -> String {
        format!("{}/ask/", self.base_url)
    }

    /// Assemble the multipart form, reading each staged file from disk.
    async fn build_form(
        documents: &[DocumentRef],
    ) -> Result<reqwest::multipart::Form, TransportError> {
        let mut form = reqwest::multipart::Form::new();
        for doc in documents {
            let bytes = tokio::fs::read(&doc.source)
                .await
                .map_err(|source| TransportError::Read {
                    name: doc.name.clone(),
                    source,
                })?;
            let part = reqwest::multipart::Part::bytes(bytes)
                .file_name(doc.name.clone())
                .mime_str(PDF_MIME)
                .map_err(|e| TransportError::Body(e.to_string()))?;
            form = form.part("files", part);
        }
        Ok(form)
    }
}

/// Map a non-success status to a typed error.
fn check_status(response: &reqwest::Response) -> Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(TransportError::Status {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
    })
}

fn client_with_timeout(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .get(&self.base_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok()
    }

    async fn upload(&self, documents: &[DocumentRef]) -> Result<UploadOutcome, TransportError> {
        if documents.is_empty() {
            return Err(TransportError::NoDocuments);
        }

        tracing::info!(count = documents.len(), "uploading documents");
        let form = Self::build_form(documents).await?;

        let response = self
            .upload_client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        check_status(&response)?;

        response
            .json::<UploadOutcome>()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }

    async fn ask(&self, question: &str) -> Result<AskOutcome, TransportError> {
        tracing::debug!(chars = question.len(), "asking question");

        let response = self
            .http_client
            .post(self.ask_url())
            .json(&serde_json::json!({ "question": question }))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        check_status(&response)?;

        response
            .json::<AskOutcome>()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> HttpBackend {
        HttpBackend::new(base, Duration::from_secs(120), Duration::from_secs(300))
    }

    #[test]
    fn test_endpoint_urls() {
        let backend = backend("http://localhost:8000");
        assert_eq!(backend.upload_url(), "http://localhost:8000/upload/");
        assert_eq!(backend.ask_url(), "http://localhost:8000/ask/");
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let backend = backend("http://localhost:8000/");
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.upload_url(), "http://localhost:8000/upload/");
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_set_without_network() {
        // An unroutable base URL: if the transport tried the network this
        // would fail differently (or hang), so NoDocuments proves the check
        // runs first.
        let backend = backend("http://[::1]:1");
        let result = backend.upload(&[]).await;
        assert!(matches!(result, Err(TransportError::NoDocuments)));
    }

    #[tokio::test]
    async fn test_upload_surfaces_unreadable_file() {
        let backend = backend("http://[::1]:1");
        let docs = vec![DocumentRef {
            name: "missing.pdf".to_string(),
            source: "/nonexistent/missing.pdf".into(),
        }];
        let result = backend.upload(&docs).await;
        match result {
            Err(TransportError::Read { name, .. }) => assert_eq!(name, "missing.pdf"),
            other => panic!("expected Read error, got {other:?}"),
        }
    }
}
