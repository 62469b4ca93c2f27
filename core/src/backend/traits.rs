//! Document Backend Traits
//!
//! Trait definition for document-chat backends. The abstraction keeps the
//! Coordinator and session state machines independent of the transport, so
//! tests drive them with an in-memory backend.
//!
//! # Design Philosophy
//!
//! Each operation resolves exactly once with either a typed outcome or a
//! `TransportError`. HTTP error statuses are rejections, not panics: callers
//! decide how to surface them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::documents::DocumentRef;

/// Errors from a backend operation.
///
/// Network failures and HTTP error statuses both land here; the caller reverts
/// the relevant session state and shows the message.
#[derive(Debug, Error)]
pub enum TransportError {
    /// `upload` was called with an empty document set.
    ///
    /// Validated before any network activity; callers should prevent this,
    /// the transport enforces it.
    #[error("no documents to upload")]
    NoDocuments,

    /// A staged file could not be read from disk.
    #[error("failed to read {name}: {source}")]
    Read {
        /// Display name of the unreadable document.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("server returned {status} {status_text}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase (e.g. "Internal Server Error").
        status_text: String,
    },

    /// The request never completed (connection refused, timeout, DNS).
    #[error("request failed: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("unexpected response body: {0}")]
    Body(String),
}

/// Successful upload acknowledgement.
#[derive(Clone, Debug, Deserialize)]
pub struct UploadOutcome {
    /// Human-readable status from the server.
    pub message: String,
}

/// Who authored a server-side history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryRole {
    /// A user question.
    #[serde(rename = "user")]
    User,
    /// A generated answer.
    #[serde(rename = "ai")]
    Ai,
}

/// One entry in the server-side conversation history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Entry author.
    pub role: HistoryRole,
    /// Entry text.
    pub content: String,
}

/// Successful answer to a question.
#[derive(Clone, Debug, Deserialize)]
pub struct AskOutcome {
    /// The generated answer.
    pub answer: String,
    /// Full server-side history; informational, the client keeps its own
    /// transcript as the source of truth for display.
    #[serde(default)]
    pub chat_history: Vec<HistoryEntry>,
}

/// Document backend trait
///
/// Implement this trait to talk to a document-chat server (or to fake one in
/// tests).
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Get the backend name (for logs and status lines)
    fn name(&self) -> &str;

    /// Check if the backend is healthy and reachable
    async fn health_check(&self) -> bool;

    /// Upload a batch of documents for ingestion.
    ///
    /// Rejects an empty set with [`TransportError::NoDocuments`] before any
    /// network activity.
    async fn upload(&self, documents: &[DocumentRef]) -> Result<UploadOutcome, TransportError>;

    /// Ask a question about the previously uploaded documents.
    async fn ask(&self, question: &str) -> Result<AskOutcome, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_outcome_decodes_history() {
        let body = r#"{
            "answer": "It covers X.",
            "chat_history": [
                {"role": "user", "content": "What does it cover?"},
                {"role": "ai", "content": "It covers X."}
            ]
        }"#;

        let outcome: AskOutcome = serde_json::from_str(body).unwrap();
        assert_eq!(outcome.answer, "It covers X.");
        assert_eq!(outcome.chat_history.len(), 2);
        assert_eq!(outcome.chat_history[0].role, HistoryRole::User);
        assert_eq!(outcome.chat_history[1].role, HistoryRole::Ai);
    }

    #[test]
    fn test_ask_outcome_history_is_optional() {
        let outcome: AskOutcome = serde_json::from_str(r#"{"answer": "Yes."}"#).unwrap();
        assert_eq!(outcome.answer, "Yes.");
        assert!(outcome.chat_history.is_empty());
    }

    #[test]
    fn test_transport_error_messages() {
        let err = TransportError::Status {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "server returned 500 Internal Server Error");

        let err = TransportError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "request failed: connection refused");
    }
}
