//! Coordinator - The Session Core
//!
//! The Coordinator is the headless brain of the client. It owns:
//! - The upload session (staging, submission, readiness)
//! - The chat session (transcript, pending answer)
//! - The active screen
//! - The backend calls, with exactly one upload and one ask in flight at most
//!
//! # Design Philosophy
//!
//! The Coordinator is UI-agnostic. It doesn't know or care whether it's
//! talking to a TUI, a web surface, or a test harness. It communicates
//! through:
//! - `CoordinatorMessage`: Commands sent TO the UI surface
//! - `UiEvent`: Events received FROM the UI surface
//!
//! Backend calls are spawned onto the runtime and resolved cooperatively:
//! the surface's frame loop calls [`Coordinator::poll_pending`], which
//! settles any completed call into the session state. A generation counter
//! guards against stale resolutions: going back to the landing screen bumps
//! the generation, and any response tagged with an older generation is
//! discarded instead of mutating the fresh session.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::backend::{AskOutcome, DocumentBackend, TransportError, UploadOutcome};
use crate::chat::{ChatSession, TurnId};
use crate::config::DocChatConfig;
use crate::events::UiEvent;
use crate::messages::{CoordinatorMessage, CoordinatorState, NotifyLevel};
use crate::shell::{transition, Screen, ScreenEvent};
use crate::upload::{UploadPhase, UploadSession};

/// Coordinator configuration
#[derive(Clone, Debug)]
pub struct CoordinatorConfig {
    /// Whether to probe the backend on startup
    pub health_check_on_start: bool,
    /// Maximum question length in characters
    pub max_question_chars: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            health_check_on_start: true,
            max_question_chars: 8192,
        }
    }
}

impl CoordinatorConfig {
    /// Create configuration from loaded application config
    #[must_use]
    pub fn from_config(config: &DocChatConfig) -> Self {
        Self {
            health_check_on_start: config.health_check_on_start,
            max_question_chars: config.max_question_chars,
        }
    }
}

/// An upload call in flight.
struct PendingUpload {
    rx: oneshot::Receiver<Result<UploadOutcome, TransportError>>,
    generation: u64,
}

/// An ask call in flight.
struct PendingAnswer {
    rx: oneshot::Receiver<Result<AskOutcome, TransportError>>,
    pending_id: TurnId,
    generation: u64,
}

/// The Coordinator - headless session core
pub struct Coordinator<B: DocumentBackend> {
    /// Configuration
    config: CoordinatorConfig,
    /// Document backend
    backend: Arc<B>,
    /// Upload session
    upload: UploadSession,
    /// Chat session
    chat: ChatSession,
    /// Active screen
    screen: Screen,
    /// Current operational state
    state: CoordinatorState,
    /// Bumped on session reset; stale resolutions are discarded
    generation: u64,
    /// Upload call in flight, if any
    pending_upload: Option<PendingUpload>,
    /// Ask call in flight, if any
    pending_answer: Option<PendingAnswer>,
    /// Channel to send messages to UI surface
    tx: mpsc::Sender<CoordinatorMessage>,
}

impl<B: DocumentBackend + 'static> Coordinator<B> {
    /// Create a new Coordinator with the given backend
    pub fn new(backend: B, config: CoordinatorConfig, tx: mpsc::Sender<CoordinatorMessage>) -> Self {
        Self {
            config,
            backend: Arc::new(backend),
            upload: UploadSession::new(),
            chat: ChatSession::new(),
            screen: Screen::Landing,
            state: CoordinatorState::Initializing,
            generation: 0,
            pending_upload: None,
            pending_answer: None,
            tx,
        }
    }

    /// Get current state
    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Get the active screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Get the upload session
    pub fn upload(&self) -> &UploadSession {
        &self.upload
    }

    /// Get the chat session
    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Start the Coordinator (probe the backend, announce the first screen)
    pub async fn start(&mut self) -> anyhow::Result<()> {
        self.set_state(CoordinatorState::Initializing).await;

        if self.config.health_check_on_start && !self.backend.health_check().await {
            tracing::warn!(backend = self.backend.name(), "health check failed");
            self.notify(
                NotifyLevel::Warning,
                "Backend not reachable - uploads and questions may fail",
            )
            .await;
        }

        self.set_state(CoordinatorState::Ready).await;
        self.send(CoordinatorMessage::Screen { screen: self.screen })
            .await;

        Ok(())
    }

    /// Handle an event from the UI surface
    pub async fn handle_event(&mut self, event: UiEvent) -> anyhow::Result<()> {
        match event {
            UiEvent::GetStarted => {
                self.apply_screen_event(ScreenEvent::GetStarted).await;
            }

            // Picker and drop converge on the same staging filter
            UiEvent::DocumentsPicked { paths } | UiEvent::DocumentsDropped { paths } => {
                if self.upload.phase() == UploadPhase::Submitting
                    || self.upload.phase() == UploadPhase::Ready
                {
                    tracing::debug!("ignoring staged files while submitting or ready");
                    return Ok(());
                }
                let offered = paths.len();
                let added = self.upload.add(paths);
                if added < offered {
                    self.notify(
                        NotifyLevel::Warning,
                        &format!("{} file(s) skipped (PDF only)", offered - added),
                    )
                    .await;
                }
                self.send_staged().await;
            }

            UiEvent::DocumentRemoved { index } => {
                if self.upload.remove(index).is_some() {
                    self.send_staged().await;
                }
            }

            UiEvent::ProcessRequested => {
                self.begin_upload().await;
            }

            UiEvent::QuestionSubmitted { text } => {
                self.submit_question(&text).await;
            }

            UiEvent::BackRequested => {
                self.reset_sessions().await;
            }

            UiEvent::QuitRequested => {
                self.set_state(CoordinatorState::ShuttingDown).await;
                self.send(CoordinatorMessage::Quit).await;
            }
        }

        Ok(())
    }

    /// Poll in-flight backend calls and settle completed ones.
    ///
    /// Called from the surface's frame loop. Returns `true` if anything
    /// settled (the surface should redraw).
    pub async fn poll_pending(&mut self) -> bool {
        let mut settled = false;

        if let Some(mut pending) = self.pending_upload.take() {
            match pending.rx.try_recv() {
                Err(oneshot::error::TryRecvError::Empty) => {
                    self.pending_upload = Some(pending);
                }
                Ok(result) => {
                    if pending.generation == self.generation {
                        self.settle_upload(result).await;
                    } else {
                        tracing::debug!("discarding upload result from old session");
                    }
                    settled = true;
                }
                Err(oneshot::error::TryRecvError::Closed) => {
                    if pending.generation == self.generation {
                        self.settle_upload(Err(TransportError::Network(
                            "upload task dropped".to_string(),
                        )))
                        .await;
                    }
                    settled = true;
                }
            }
        }

        if let Some(mut pending) = self.pending_answer.take() {
            match pending.rx.try_recv() {
                Err(oneshot::error::TryRecvError::Empty) => {
                    self.pending_answer = Some(pending);
                }
                Ok(result) => {
                    if pending.generation == self.generation {
                        self.settle_answer(&pending.pending_id, result).await;
                    } else {
                        tracing::debug!("discarding answer from old session");
                    }
                    settled = true;
                }
                Err(oneshot::error::TryRecvError::Closed) => {
                    if pending.generation == self.generation {
                        self.settle_answer(
                            &pending.pending_id,
                            Err(TransportError::Network("ask task dropped".to_string())),
                        )
                        .await;
                    }
                    settled = true;
                }
            }
        }

        settled
    }

    /// Submit the staged documents.
    async fn begin_upload(&mut self) {
        let Some(snapshot) = self.upload.begin_submit() else {
            // Empty or already submitting; nothing goes on the wire
            tracing::debug!("ignoring process request with nothing to submit");
            return;
        };

        self.set_state(CoordinatorState::Uploading).await;
        self.send(CoordinatorMessage::UploadStarted).await;

        let backend = Arc::clone(&self.backend);
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = backend.upload(&snapshot).await;
            let _ = tx.send(result);
        });

        self.pending_upload = Some(PendingUpload {
            rx,
            generation: self.generation,
        });
    }

    async fn settle_upload(&mut self, result: Result<UploadOutcome, TransportError>) {
        match result {
            Ok(outcome) => {
                let documents = self.upload.complete();
                tracing::info!(count = documents.len(), "upload complete");
                self.send(CoordinatorMessage::UploadComplete {
                    message: outcome.message,
                    documents,
                })
                .await;
                self.apply_screen_event(ScreenEvent::DocumentsReady).await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload failed");
                self.upload.fail();
                self.send(CoordinatorMessage::UploadFailed {
                    error: e.to_string(),
                })
                .await;
            }
        }
        self.set_state(CoordinatorState::Ready).await;
    }

    /// Submit a question about the processed documents.
    async fn submit_question(&mut self, text: &str) {
        if text.trim().chars().count() > self.config.max_question_chars {
            self.notify(
                NotifyLevel::Warning,
                &format!(
                    "Question too long (max {} characters)",
                    self.config.max_question_chars
                ),
            )
            .await;
            return;
        }

        let Some(receipt) = self.chat.send(text) else {
            // Empty text or an answer is already outstanding
            tracing::debug!("ignoring question submission");
            return;
        };

        self.send(CoordinatorMessage::TurnAdded {
            turn: receipt.user.clone(),
        })
        .await;
        self.send(CoordinatorMessage::TurnAdded {
            turn: receipt.placeholder.clone(),
        })
        .await;
        self.set_state(CoordinatorState::Thinking).await;

        let backend = Arc::clone(&self.backend);
        let question = receipt.user.content;
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = backend.ask(&question).await;
            let _ = tx.send(result);
        });

        self.pending_answer = Some(PendingAnswer {
            rx,
            pending_id: receipt.placeholder.id,
            generation: self.generation,
        });
    }

    async fn settle_answer(
        &mut self,
        pending_id: &TurnId,
        result: Result<AskOutcome, TransportError>,
    ) {
        let turn = match result {
            Ok(outcome) => self.chat.resolve(outcome.answer),
            Err(e) => {
                tracing::warn!(error = %e, "ask failed");
                self.chat.fail(format!("Sorry - I couldn't answer that. {e}"))
            }
        };

        if let Some(turn) = turn {
            self.send(CoordinatorMessage::TurnResolved {
                pending_id: pending_id.clone(),
                turn,
            })
            .await;
        }
        self.set_state(CoordinatorState::Ready).await;
    }

    /// Discard both sessions and return to the landing screen.
    ///
    /// In-flight calls are abandoned; the generation bump makes any late
    /// resolution a no-op.
    async fn reset_sessions(&mut self) {
        self.generation += 1;
        self.pending_upload = None;
        self.pending_answer = None;
        self.upload = UploadSession::new();
        self.chat = ChatSession::new();
        self.screen = Screen::Landing;
        self.set_state(CoordinatorState::Ready).await;
        self.send(CoordinatorMessage::SessionReset).await;
        self.send(CoordinatorMessage::Screen { screen: self.screen })
            .await;
    }

    async fn apply_screen_event(&mut self, event: ScreenEvent) {
        let next = transition(self.screen, event);
        if next != self.screen {
            self.screen = next;
            self.send(CoordinatorMessage::Screen { screen: next }).await;
        }
    }

    async fn send_staged(&mut self) {
        self.send(CoordinatorMessage::StagedDocuments {
            names: self.upload.staged_names(),
        })
        .await;
    }

    async fn set_state(&mut self, state: CoordinatorState) {
        if self.state != state {
            self.state = state;
            self.send(CoordinatorMessage::State { state }).await;
        }
    }

    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(CoordinatorMessage::Notify {
            level,
            message: message.to_string(),
        })
        .await;
    }

    async fn send(&self, message: CoordinatorMessage) {
        if self.tx.send(message).await.is_err() {
            tracing::warn!("surface channel closed, message dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NoopBackend;

    #[async_trait]
    impl DocumentBackend for NoopBackend {
        fn name(&self) -> &str {
            "noop"
        }

        async fn health_check(&self) -> bool {
            true
        }

        async fn upload(
            &self,
            _documents: &[crate::documents::DocumentRef],
        ) -> Result<UploadOutcome, TransportError> {
            Ok(UploadOutcome {
                message: "ok".to_string(),
            })
        }

        async fn ask(&self, _question: &str) -> Result<AskOutcome, TransportError> {
            Ok(AskOutcome {
                answer: "fine".to_string(),
                chat_history: Vec::new(),
            })
        }
    }

    fn coordinator() -> (
        Coordinator<NoopBackend>,
        mpsc::Receiver<CoordinatorMessage>,
    ) {
        let (tx, rx) = mpsc::channel(64);
        (
            Coordinator::new(NoopBackend, CoordinatorConfig::default(), tx),
            rx,
        )
    }

    #[tokio::test]
    async fn test_start_announces_screen_and_ready() {
        let (mut c, mut rx) = coordinator();
        c.start().await.unwrap();

        assert_eq!(c.state(), CoordinatorState::Ready);
        assert_eq!(c.screen(), Screen::Landing);

        let mut saw_screen = false;
        while let Ok(msg) = rx.try_recv() {
            if matches!(msg, CoordinatorMessage::Screen { screen: Screen::Landing }) {
                saw_screen = true;
            }
        }
        assert!(saw_screen);
    }

    #[tokio::test]
    async fn test_get_started_moves_to_upload_screen() {
        let (mut c, _rx) = coordinator();
        c.start().await.unwrap();

        c.handle_event(UiEvent::GetStarted).await.unwrap();
        assert_eq!(c.screen(), Screen::Upload);
    }

    #[tokio::test]
    async fn test_picked_and_dropped_share_the_filter() {
        let (mut c, _rx) = coordinator();
        c.start().await.unwrap();
        c.handle_event(UiEvent::GetStarted).await.unwrap();

        c.handle_event(UiEvent::DocumentsPicked {
            paths: vec!["a.pdf".into(), "a.txt".into()],
        })
        .await
        .unwrap();
        c.handle_event(UiEvent::DocumentsDropped {
            paths: vec!["b.PDF".into(), "b.png".into()],
        })
        .await
        .unwrap();

        assert_eq!(c.upload().staged_names(), vec!["a.pdf", "b.PDF"]);
    }

    #[tokio::test]
    async fn test_process_with_nothing_staged_is_ignored() {
        let (mut c, _rx) = coordinator();
        c.start().await.unwrap();
        c.handle_event(UiEvent::GetStarted).await.unwrap();

        c.handle_event(UiEvent::ProcessRequested).await.unwrap();
        assert_eq!(c.upload().phase(), UploadPhase::Empty);
        assert_eq!(c.state(), CoordinatorState::Ready);
    }

    #[tokio::test]
    async fn test_over_long_question_is_refused() {
        let (tx, _rx) = mpsc::channel(64);
        let config = CoordinatorConfig {
            max_question_chars: 10,
            ..Default::default()
        };
        let mut c = Coordinator::new(NoopBackend, config, tx);
        c.start().await.unwrap();

        c.handle_event(UiEvent::QuestionSubmitted {
            text: "this question is definitely too long".to_string(),
        })
        .await
        .unwrap();

        assert!(c.chat().transcript().is_empty());
        assert_eq!(c.state(), CoordinatorState::Ready);
    }

    #[tokio::test]
    async fn test_question_cap_counts_chars_not_bytes() {
        let (tx, _rx) = mpsc::channel(64);
        let config = CoordinatorConfig {
            max_question_chars: 10,
            ..Default::default()
        };
        let mut c = Coordinator::new(NoopBackend, config, tx);
        c.start().await.unwrap();

        // 8 chars, 24 bytes in UTF-8: under the cap, must be accepted
        c.handle_event(UiEvent::QuestionSubmitted {
            text: "ドキュメントとは".to_string(),
        })
        .await
        .unwrap();

        assert_eq!(c.chat().transcript().len(), 2);
        assert_eq!(c.state(), CoordinatorState::Thinking);
    }

    #[tokio::test]
    async fn test_back_resets_everything() {
        let (mut c, _rx) = coordinator();
        c.start().await.unwrap();
        c.handle_event(UiEvent::GetStarted).await.unwrap();
        c.handle_event(UiEvent::DocumentsPicked {
            paths: vec!["a.pdf".into()],
        })
        .await
        .unwrap();

        c.handle_event(UiEvent::BackRequested).await.unwrap();

        assert_eq!(c.screen(), Screen::Landing);
        assert_eq!(c.upload().staged_count(), 0);
        assert!(c.chat().transcript().is_empty());
    }

    #[tokio::test]
    async fn test_quit_sets_shutting_down() {
        let (mut c, mut rx) = coordinator();
        c.start().await.unwrap();

        c.handle_event(UiEvent::QuitRequested).await.unwrap();
        assert_eq!(c.state(), CoordinatorState::ShuttingDown);

        let mut saw_quit = false;
        while let Ok(msg) = rx.try_recv() {
            if matches!(msg, CoordinatorMessage::Quit) {
                saw_quit = true;
            }
        }
        assert!(saw_quit);
    }
}
