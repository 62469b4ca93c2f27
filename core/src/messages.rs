//! Coordinator Messages
//!
//! Messages sent from the Coordinator to UI surfaces. These represent all the
//! ways the session layer can communicate with a connected UI (TUI today,
//! other surfaces later).
//!
//! # Design Philosophy
//!
//! The Coordinator owns the sessions and the screen; UI surfaces are pure
//! renderers that display what the Coordinator tells them to. The UI holds no
//! business logic of its own, so the state machines stay testable headlessly.

use serde::{Deserialize, Serialize};

use crate::chat::{ChatTurn, TurnId};
use crate::shell::Screen;

/// Messages from Coordinator to UI Surface
///
/// These messages tell the UI what to display. The UI should not have any
/// business logic - just render what it's told.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CoordinatorMessage {
    /// The active screen changed
    Screen {
        /// The screen to render
        screen: Screen,
    },

    /// The staged document list changed (add or remove)
    StagedDocuments {
        /// Display names, in staging order
        names: Vec<String>,
    },

    /// An upload call went out; staging controls should lock
    UploadStarted,

    /// The upload was acknowledged; the chat screen follows
    UploadComplete {
        /// Server status message
        message: String,
        /// Display names of the processed documents (for the sidebar)
        documents: Vec<String>,
    },

    /// The upload failed; the staged list is intact for retry
    UploadFailed {
        /// Error description to show inline
        error: String,
    },

    /// A turn was appended to the transcript
    TurnAdded {
        /// The new turn (user, placeholder, or assistant)
        turn: ChatTurn,
    },

    /// The pending placeholder was replaced by a final turn
    TurnResolved {
        /// ID of the placeholder that was removed
        pending_id: TurnId,
        /// The final turn (answer or error)
        turn: ChatTurn,
    },

    /// Coordinator state changed (for status lines / spinners)
    State {
        /// The new state
        state: CoordinatorState,
    },

    /// A transient notification outside the transcript
    Notify {
        /// Severity for styling
        level: NotifyLevel,
        /// The notification text
        message: String,
    },

    /// Both sessions were discarded (user went back to the landing screen)
    SessionReset,

    /// The application is shutting down
    Quit,
}

/// Notification severity levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// Something degraded but usable
    Warning,
    /// Something failed
    Error,
    /// Something completed
    Success,
}

/// Coordinator lifecycle states
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinatorState {
    /// Starting up, checking backend health
    Initializing,
    /// Idle, accepting input
    Ready,
    /// An upload call is in flight
    Uploading,
    /// An ask call is in flight
    Thinking,
    /// Shutting down
    ShuttingDown,
}

impl CoordinatorState {
    /// Human-readable description for status lines.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Initializing => "Starting...",
            Self::Ready => "Ready",
            Self::Uploading => "Processing documents...",
            Self::Thinking => "Thinking...",
            Self::ShuttingDown => "Shutting down...",
        }
    }

    /// Whether an operation is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Uploading | Self::Thinking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_descriptions() {
        assert_eq!(CoordinatorState::Ready.description(), "Ready");
        assert_eq!(
            CoordinatorState::Uploading.description(),
            "Processing documents..."
        );
        assert_eq!(CoordinatorState::Thinking.description(), "Thinking...");
    }

    #[test]
    fn test_busy_states() {
        assert!(CoordinatorState::Uploading.is_busy());
        assert!(CoordinatorState::Thinking.is_busy());
        assert!(!CoordinatorState::Ready.is_busy());
        assert!(!CoordinatorState::Initializing.is_busy());
    }

    #[test]
    fn test_message_serialization_round_trip() {
        let msg = CoordinatorMessage::UploadComplete {
            message: "2 files processed".to_string(),
            documents: vec!["a.pdf".to_string(), "b.pdf".to_string()],
        };
        let json = serde_json::to_string(&msg).unwrap();
        let back: CoordinatorMessage = serde_json::from_str(&json).unwrap();
        match back {
            CoordinatorMessage::UploadComplete { message, documents } => {
                assert_eq!(message, "2 files processed");
                assert_eq!(documents.len(), 2);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
