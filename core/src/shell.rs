//! Screen State
//!
//! The active screen is a tagged variant and every transition is an explicit
//! pure function from (current screen, event) to the next screen — no ambient
//! toggles. Illegal combinations keep the current screen.

use serde::{Deserialize, Serialize};

/// Which screen is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Marketing landing page.
    Landing,
    /// Document staging and submission.
    Upload,
    /// Conversation with the processed documents.
    Chat,
}

/// Events that drive screen transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The explicit "get started" action on the landing page.
    GetStarted,
    /// The upload session reached `Ready`.
    DocumentsReady,
    /// The explicit "back" action; the caller resets both sessions.
    Back,
}

/// Pure screen-transition function.
#[must_use]
pub fn transition(screen: Screen, event: ScreenEvent) -> Screen {
    match (screen, event) {
        (Screen::Landing, ScreenEvent::GetStarted) => Screen::Upload,
        (Screen::Upload, ScreenEvent::DocumentsReady) => Screen::Chat,
        (_, ScreenEvent::Back) => Screen::Landing,
        (current, _) => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let s = transition(Screen::Landing, ScreenEvent::GetStarted);
        assert_eq!(s, Screen::Upload);
        let s = transition(s, ScreenEvent::DocumentsReady);
        assert_eq!(s, Screen::Chat);
        let s = transition(s, ScreenEvent::Back);
        assert_eq!(s, Screen::Landing);
    }

    #[test]
    fn test_illegal_transitions_keep_screen() {
        assert_eq!(
            transition(Screen::Landing, ScreenEvent::DocumentsReady),
            Screen::Landing
        );
        assert_eq!(
            transition(Screen::Chat, ScreenEvent::GetStarted),
            Screen::Chat
        );
    }

    #[test]
    fn test_back_works_from_anywhere() {
        assert_eq!(transition(Screen::Upload, ScreenEvent::Back), Screen::Landing);
        assert_eq!(transition(Screen::Landing, ScreenEvent::Back), Screen::Landing);
    }
}
