//! Document Backend
//!
//! Trait definition and HTTP implementation for the document-chat backend:
//! upload a batch of PDFs for ingestion, then ask questions about them.
//!
//! # Design Philosophy
//!
//! The Coordinator is generic over `DocumentBackend`, so the session state
//! machines and tests never touch the network. The HTTP implementation is the
//! only module that knows the wire format.

pub mod http;
pub mod traits;

pub use http::HttpBackend;
pub use traits::{
    AskOutcome, DocumentBackend, HistoryEntry, HistoryRole, TransportError, UploadOutcome,
};
