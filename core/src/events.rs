//! Surface Events
//!
//! Events sent from UI surfaces to the Coordinator. These represent all the
//! ways a UI can communicate user actions to the session layer.
//!
//! # Design Philosophy
//!
//! UI surfaces are "dumb" renderers that forward user actions to the
//! Coordinator. They don't interpret what actions mean - they just report
//! what happened. The Coordinator decides how to respond.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Events from UI Surface to Coordinator
///
/// These events tell the Coordinator what the user did. The Coordinator
/// responds with `CoordinatorMessage`s.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum UiEvent {
    /// The explicit "get started" action on the landing screen
    GetStarted,

    /// Documents selected through the picker flow.
    ///
    /// Routed through the same staging filter as `DocumentsDropped`; the two
    /// input paths converge before any state changes.
    DocumentsPicked {
        /// Selected file paths
        paths: Vec<PathBuf>,
    },

    /// Documents dropped onto the staging area (or passed on the command line)
    DocumentsDropped {
        /// Dropped file paths
        paths: Vec<PathBuf>,
    },

    /// A staged document was removed by position
    DocumentRemoved {
        /// Index into the staged list
        index: usize,
    },

    /// The user asked to submit the staged documents
    ProcessRequested,

    /// The user submitted a question
    QuestionSubmitted {
        /// The question text (trimmed by the session)
        text: String,
    },

    /// The explicit "back" action; discards both sessions
    BackRequested,

    /// The user asked to quit
    QuitRequested,
}
