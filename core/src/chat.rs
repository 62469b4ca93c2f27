//! Chat Session
//!
//! Tracks the ordered transcript of user/assistant turns and the pending
//! state while an answer is outstanding.
//!
//! # Design Philosophy
//!
//! The transcript is the single source of truth: the `AwaitingAnswer` phase
//! and the pending placeholder are held in one canonical state instead of
//! duplicated booleans that can desynchronize. At most one turn is pending at
//! any moment, because `send` is refused while an answer is outstanding.

use serde::{Deserialize, Serialize};

/// Turn identifier — unique and monotonic, usable as a stable list key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub String);

impl TurnId {
    /// Generate a new unique turn ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        Self(format!("turn_{id}"))
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

/// Who authored a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnRole {
    /// The user's own message.
    User,
    /// The backend's answer (or an error standing in for one).
    Assistant,
}

/// Rendering flavor for a turn's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnKind {
    /// A normal message.
    #[default]
    Plain,
    /// A failure surfaced in place of an answer, distinguishable from one.
    Error,
}

/// One message in the transcript.
///
/// Never mutated after creation; the pending placeholder is removed (not
/// edited) when its answer arrives.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Unique turn ID.
    pub id: TurnId,
    /// Who authored this turn.
    pub role: TurnRole,
    /// Textual content (empty for the pending placeholder).
    pub content: String,
    /// Creation time (Unix timestamp ms).
    pub timestamp: u64,
    /// Placeholder flag for the in-flight assistant turn.
    pub pending: bool,
    /// Plain answer or error flavor.
    pub kind: TurnKind,
}

impl ChatTurn {
    fn new(role: TurnRole, content: String, pending: bool, kind: TurnKind) -> Self {
        Self {
            id: TurnId::new(),
            role,
            content,
            timestamp: now_ms(),
            pending,
            kind,
        }
    }

    /// A user turn (appended optimistically, no network round trip).
    pub fn user(content: String) -> Self {
        Self::new(TurnRole::User, content, false, TurnKind::Plain)
    }

    /// The in-flight assistant placeholder.
    pub fn placeholder() -> Self {
        Self::new(TurnRole::Assistant, String::new(), true, TurnKind::Plain)
    }

    /// A final assistant answer.
    pub fn answer(content: String) -> Self {
        Self::new(TurnRole::Assistant, content, false, TurnKind::Plain)
    }

    /// An error turn standing in for a failed answer.
    pub fn error(content: String) -> Self {
        Self::new(TurnRole::Assistant, content, false, TurnKind::Error)
    }
}

/// Chat session phases: `Idle → AwaitingAnswer → Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatPhase {
    /// Ready to accept a question.
    Idle,
    /// A question is outstanding; `send` is refused.
    AwaitingAnswer,
}

/// Receipt for an accepted `send`: the turns that were appended.
#[derive(Clone, Debug)]
pub struct SendReceipt {
    /// The user's turn.
    pub user: ChatTurn,
    /// The pending assistant placeholder.
    pub placeholder: ChatTurn,
}

/// The chat session state machine.
#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
    pending_id: Option<TurnId>,
}

impl ChatSession {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase, derived from the pending placeholder.
    #[must_use]
    pub fn phase(&self) -> ChatPhase {
        if self.pending_id.is_some() {
            ChatPhase::AwaitingAnswer
        } else {
            ChatPhase::Idle
        }
    }

    /// Submit a question.
    ///
    /// Appends the user turn immediately (optimistic) plus a pending
    /// assistant placeholder, and enters `AwaitingAnswer`. Returns `None` —
    /// with no turns appended — when the trimmed text is empty or an answer
    /// is already outstanding.
    pub fn send(&mut self, text: &str) -> Option<SendReceipt> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.pending_id.is_some() {
            return None;
        }

        let user = ChatTurn::user(trimmed.to_string());
        let placeholder = ChatTurn::placeholder();
        self.pending_id = Some(placeholder.id.clone());
        self.turns.push(user.clone());
        self.turns.push(placeholder.clone());

        Some(SendReceipt { user, placeholder })
    }

    /// The answer arrived: remove the placeholder, append the final
    /// assistant turn, return to `Idle`.
    ///
    /// Returns `None` when no answer is outstanding.
    pub fn resolve(&mut self, answer: String) -> Option<ChatTurn> {
        self.settle(ChatTurn::answer(answer))
    }

    /// The ask call failed: remove the placeholder, append an error turn,
    /// return to `Idle`. The session stays usable.
    pub fn fail(&mut self, error: String) -> Option<ChatTurn> {
        self.settle(ChatTurn::error(error))
    }

    fn settle(&mut self, turn: ChatTurn) -> Option<ChatTurn> {
        let pending_id = self.pending_id.take()?;
        self.turns.retain(|t| t.id != pending_id);
        self.turns.push(turn.clone());
        Some(turn)
    }

    /// ID of the pending placeholder, if an answer is outstanding.
    #[must_use]
    pub fn pending_id(&self) -> Option<&TurnId> {
        self.pending_id.as_ref()
    }

    /// The full transcript, in insertion order.
    #[must_use]
    pub fn transcript(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Number of turns currently flagged pending (0 or 1 by invariant).
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.turns.iter().filter(|t| t.pending).count()
    }
}

/// Get current timestamp in milliseconds.
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
