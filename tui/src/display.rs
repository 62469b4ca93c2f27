//! Display State Types
//!
//! Types that represent the current display state for the TUI.
//! These are derived from CoordinatorMessages and used for rendering.
//!
//! # Design Philosophy
//!
//! The TUI is a "thin client" - it just renders what the Coordinator tells
//! it to. Display state is the bridge between CoordinatorMessages and
//! rendering. Nothing here decides anything; it only accumulates.

use docchat_core::{
    ChatTurn, CoordinatorMessage, CoordinatorState, NotifyLevel, Screen, TurnRole,
};

/// A transient notification line.
#[derive(Clone, Debug)]
pub struct Notice {
    /// Severity for styling
    pub level: NotifyLevel,
    /// The notification text
    pub message: String,
}

/// Accumulated display state, updated from CoordinatorMessages.
pub struct DisplayState {
    /// The screen to render
    pub screen: Screen,
    /// Current coordinator state (for the status line)
    pub coordinator_state: CoordinatorState,
    /// Staged document names, in staging order
    pub staged: Vec<String>,
    /// Processed document names (sidebar on the chat screen)
    pub processed: Vec<String>,
    /// The rendered transcript
    pub transcript: Vec<ChatTurn>,
    /// Last upload error, shown inline until dismissed
    pub upload_error: Option<String>,
    /// Last transient notification
    pub notice: Option<Notice>,
    /// Server message from the last successful upload
    pub upload_message: Option<String>,
    /// Set once a Quit message arrives
    pub quitting: bool,
}

impl DisplayState {
    /// Create an empty display state
    pub fn new() -> Self {
        Self {
            screen: Screen::Landing,
            coordinator_state: CoordinatorState::Initializing,
            staged: Vec::new(),
            processed: Vec::new(),
            transcript: Vec::new(),
            upload_error: None,
            notice: None,
            upload_message: None,
            quitting: false,
        }
    }

    /// Whether an answer is currently outstanding.
    pub fn awaiting_answer(&self) -> bool {
        self.transcript.iter().any(|t| t.pending)
    }

    /// Apply one message from the Coordinator.
    pub fn apply_message(&mut self, msg: CoordinatorMessage) {
        match msg {
            CoordinatorMessage::Screen { screen } => {
                self.screen = screen;
            }

            CoordinatorMessage::StagedDocuments { names } => {
                self.staged = names;
                // Changing the staging set supersedes a stale upload error
                self.upload_error = None;
            }

            CoordinatorMessage::UploadStarted => {
                self.upload_error = None;
            }

            CoordinatorMessage::UploadComplete { message, documents } => {
                self.upload_message = Some(message);
                self.processed = documents;
                self.staged.clear();
            }

            CoordinatorMessage::UploadFailed { error } => {
                self.upload_error = Some(error);
            }

            CoordinatorMessage::TurnAdded { turn } => {
                self.transcript.push(turn);
            }

            CoordinatorMessage::TurnResolved { pending_id, turn } => {
                self.transcript.retain(|t| t.id != pending_id);
                self.transcript.push(turn);
            }

            CoordinatorMessage::State { state } => {
                self.coordinator_state = state;
            }

            CoordinatorMessage::Notify { level, message } => {
                self.notice = Some(Notice { level, message });
            }

            CoordinatorMessage::SessionReset => {
                self.staged.clear();
                self.processed.clear();
                self.transcript.clear();
                self.upload_error = None;
                self.upload_message = None;
                self.notice = None;
            }

            CoordinatorMessage::Quit => {
                self.quitting = true;
            }
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the transcript prefix for a turn role.
pub fn role_prefix(role: TurnRole) -> &'static str {
    match role {
        TurnRole::User => "You: ",
        TurnRole::Assistant => "DocChat: ",
    }
}
