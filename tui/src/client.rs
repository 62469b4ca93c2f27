//! Coordinator Client
//!
//! Thin wrapper around the Coordinator for TUI integration.
//! This client embeds the Coordinator directly (no network hop between the
//! surface and the session core) and provides a convenient interface for
//! sending events and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any business logic.
//! All session state lives in the Coordinator. The TUI's job is:
//! 1. Convert terminal events to UiEvents
//! 2. Send UiEvents to the Coordinator
//! 3. Receive CoordinatorMessages
//! 4. Render display state based on messages

use std::path::PathBuf;

use tokio::sync::mpsc;

use docchat_core::{
    ConfigOverrides, Coordinator, CoordinatorConfig, CoordinatorMessage, CoordinatorState,
    HttpBackend, Screen, UiEvent,
};

/// Client for communicating with the embedded Coordinator
pub struct CoordinatorClient {
    /// The embedded Coordinator instance
    coordinator: Coordinator<HttpBackend>,
    /// Receiver for messages from the Coordinator
    rx: mpsc::Receiver<CoordinatorMessage>,
}

impl CoordinatorClient {
    /// Create a new client with an embedded Coordinator.
    ///
    /// Configuration comes from the TOML file and environment, with the
    /// given CLI overrides applied on top.
    pub fn new(overrides: &ConfigOverrides) -> anyhow::Result<Self> {
        let mut config = docchat_core::load_config()?;
        overrides.apply(&mut config);
        tracing::info!(source = %config.source(), base_url = %config.base_url, "configuration loaded");

        // Channel for Coordinator -> TUI messages
        let (tx, rx) = mpsc::channel(100);

        let backend = HttpBackend::from_config(&config);
        let coordinator = Coordinator::new(backend, CoordinatorConfig::from_config(&config), tx);

        Ok(Self { coordinator, rx })
    }

    /// Start the Coordinator (probe the backend, announce the first screen)
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.coordinator.start().await
    }

    /// The user pressed "get started" on the landing screen
    pub async fn get_started(&mut self) -> anyhow::Result<()> {
        self.coordinator.handle_event(UiEvent::GetStarted).await
    }

    /// Stage documents selected through the path-input flow
    pub async fn pick_documents(&mut self, paths: Vec<PathBuf>) -> anyhow::Result<()> {
        self.coordinator
            .handle_event(UiEvent::DocumentsPicked { paths })
            .await
    }

    /// Stage documents handed over out-of-band (command line)
    pub async fn drop_documents(&mut self, paths: Vec<PathBuf>) -> anyhow::Result<()> {
        self.coordinator
            .handle_event(UiEvent::DocumentsDropped { paths })
            .await
    }

    /// Remove a staged document by position
    pub async fn remove_document(&mut self, index: usize) -> anyhow::Result<()> {
        self.coordinator
            .handle_event(UiEvent::DocumentRemoved { index })
            .await
    }

    /// Submit the staged documents for processing
    pub async fn process_documents(&mut self) -> anyhow::Result<()> {
        self.coordinator.handle_event(UiEvent::ProcessRequested).await
    }

    /// Submit a question about the processed documents
    pub async fn ask(&mut self, text: String) -> anyhow::Result<()> {
        self.coordinator
            .handle_event(UiEvent::QuestionSubmitted { text })
            .await
    }

    /// Go back to the landing screen, discarding both sessions
    pub async fn go_back(&mut self) -> anyhow::Result<()> {
        self.coordinator.handle_event(UiEvent::BackRequested).await
    }

    /// Notify the Coordinator that the user wants to quit
    pub async fn request_quit(&mut self) -> anyhow::Result<()> {
        self.coordinator.handle_event(UiEvent::QuitRequested).await
    }

    /// Poll in-flight backend calls (must be called regularly)
    pub async fn poll_pending(&mut self) -> bool {
        self.coordinator.poll_pending().await
    }

    /// Try to receive a message from the Coordinator (non-blocking)
    pub fn try_recv(&mut self) -> Option<CoordinatorMessage> {
        self.rx.try_recv().ok()
    }

    /// Receive all pending messages from the Coordinator (non-blocking)
    pub fn recv_all(&mut self) -> Vec<CoordinatorMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Get the current Coordinator state
    pub fn state(&self) -> CoordinatorState {
        self.coordinator.state()
    }

    /// Get the active screen
    pub fn screen(&self) -> Screen {
        self.coordinator.screen()
    }
}
