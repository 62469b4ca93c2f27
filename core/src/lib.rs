//! DocChat Core - Headless Document-Chat Client
//!
//! This crate provides the session logic for a document-chat client,
//! completely independent of any UI framework. It can drive a TUI, a web
//! surface, or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     UI Surfaces                       │
//! │   ┌─────────┐   ┌──────────────────────────────────┐ │
//! │   │   TUI   │   │         Headless / Tests         │ │
//! │   │(ratatui)│   │                                  │ │
//! │   └────┬────┘   └────────────────┬─────────────────┘ │
//! │        └─────────────┬───────────┘                   │
//! │                UiEvent (up)                          │
//! │           CoordinatorMessage (down)                  │
//! └──────────────────────┼───────────────────────────────┘
//!                        │
//! ┌──────────────────────┼───────────────────────────────┐
//! │                 DOCCHAT CORE                         │
//! │  ┌───────────────────┴─────────────────────────────┐ │
//! │  │                 Coordinator                      │ │
//! │  │  ┌─────────┐  ┌─────────┐  ┌──────┐  ┌────────┐ │ │
//! │  │  │ Upload  │  │  Chat   │  │Screen│  │Backend │ │ │
//! │  │  │ Session │  │ Session │  │      │  │ (HTTP) │ │ │
//! │  │  └─────────┘  └─────────┘  └──────┘  └────────┘ │ │
//! │  └─────────────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Coordinator`]: The main session struct that manages everything
//! - [`CoordinatorMessage`]: Messages sent from Coordinator to UI surfaces
//! - [`UiEvent`]: Events sent from UI surfaces to Coordinator
//! - [`UploadSession`]: Document staging and submission state machine
//! - [`ChatSession`]: Transcript and pending-answer state machine
//! - [`HttpBackend`]: The HTTP transport to the document-chat server
//!
//! # Quick Start
//!
//! ```ignore
//! use docchat_core::{Coordinator, CoordinatorConfig, HttpBackend, UiEvent};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (tx, mut rx) = mpsc::channel(100);
//!
//!     let config = docchat_core::load_config().unwrap_or_default();
//!     let backend = HttpBackend::from_config(&config);
//!     let mut coordinator =
//!         Coordinator::new(backend, CoordinatorConfig::from_config(&config), tx);
//!
//!     coordinator.start().await.unwrap();
//!
//!     // Main loop: forward user input, drain messages, poll pending calls
//!     loop {
//!         while let Ok(msg) = rx.try_recv() {
//!             // Render message to UI
//!         }
//!         coordinator.poll_pending().await;
//!         // Handle user input, send as UiEvent
//!     }
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`backend`]: Document backend abstraction and HTTP implementation
//! - [`chat`]: Chat session (transcript, pending answer)
//! - [`config`]: TOML/env/CLI configuration loading
//! - [`coordinator`]: Main Coordinator struct
//! - [`documents`]: Document references and the PDF staging filter
//! - [`events`]: Events from UI surfaces to Coordinator
//! - [`messages`]: Messages from Coordinator to UI surfaces
//! - [`shell`]: Screen state and transitions
//! - [`upload`]: Upload session (staging, submission, readiness)
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure session logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod chat;
pub mod config;
pub mod coordinator;
pub mod documents;
pub mod events;
pub mod messages;
pub mod shell;
pub mod upload;

// Re-exports for convenience
pub use backend::{
    AskOutcome, DocumentBackend, HistoryEntry, HistoryRole, HttpBackend, TransportError,
    UploadOutcome,
};
pub use chat::{ChatPhase, ChatSession, ChatTurn, SendReceipt, TurnId, TurnKind, TurnRole};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, DocChatConfig, DocChatToml,
};
pub use coordinator::{Coordinator, CoordinatorConfig};
pub use documents::{is_pdf, DocumentRef, PDF_MIME};
pub use events::UiEvent;
pub use messages::{CoordinatorMessage, CoordinatorState, NotifyLevel};
pub use shell::{transition, Screen, ScreenEvent};
pub use upload::{UploadPhase, UploadSession};
