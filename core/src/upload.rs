//! Upload Session
//!
//! Client-side state machine for the set of documents a user has staged and
//! the transition from staged to submitted to ready.
//!
//! # Design Philosophy
//!
//! The session never talks to the network itself. `begin_submit` hands a
//! snapshot of the staged documents to the caller (the Coordinator drives the
//! transport call) and the staged list is kept untouched, so a failed upload
//! reverts to `Staged` without the user re-selecting anything.

use serde::{Deserialize, Serialize};

use crate::documents::DocumentRef;

/// Upload session phases.
///
/// `Empty → Staged → Submitting → Ready`, with `Submitting → Staged` on
/// failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadPhase {
    /// Nothing staged yet.
    Empty,
    /// At least one document staged, not yet submitted.
    Staged,
    /// An upload call is in flight.
    Submitting,
    /// The backend acknowledged ingestion; only display names remain.
    Ready,
}

/// The upload session state machine.
#[derive(Clone, Debug, Default)]
pub struct UploadSession {
    staged: Vec<DocumentRef>,
    processed: Vec<String>,
    submitting: bool,
    ready: bool,
}

impl UploadSession {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase, derived from one canonical state rather than loose flags.
    #[must_use]
    pub fn phase(&self) -> UploadPhase {
        if self.ready {
            UploadPhase::Ready
        } else if self.submitting {
            UploadPhase::Submitting
        } else if self.staged.is_empty() {
            UploadPhase::Empty
        } else {
            UploadPhase::Staged
        }
    }

    /// Stage documents, filtering to PDF content types.
    ///
    /// Returns how many were accepted. Refused (returns 0) while `Submitting`
    /// or `Ready` — the staged set is immutable once submission begins.
    pub fn add(&mut self, paths: impl IntoIterator<Item = std::path::PathBuf>) -> usize {
        if self.submitting || self.ready {
            tracing::debug!("ignoring add while submitting or ready");
            return 0;
        }
        let before = self.staged.len();
        self.staged
            .extend(paths.into_iter().filter_map(DocumentRef::from_path));
        self.staged.len() - before
    }

    /// Remove one staged document by position. Legal only in `Staged`.
    pub fn remove(&mut self, index: usize) -> Option<DocumentRef> {
        if self.phase() != UploadPhase::Staged || index >= self.staged.len() {
            return None;
        }
        Some(self.staged.remove(index))
    }

    /// Begin submission: returns a snapshot of the staged documents for the
    /// transport call and enters `Submitting`.
    ///
    /// Returns `None` when the staged list is empty or a submission is
    /// already in flight; no network call should be made in those cases.
    pub fn begin_submit(&mut self) -> Option<Vec<DocumentRef>> {
        if self.phase() != UploadPhase::Staged {
            return None;
        }
        self.submitting = true;
        Some(self.staged.clone())
    }

    /// Submission succeeded: enter `Ready`, retaining only display names.
    ///
    /// Returns the names of the processed documents.
    pub fn complete(&mut self) -> Vec<String> {
        debug_assert!(self.submitting, "complete() without begin_submit()");
        self.processed = self.staged.drain(..).map(|d| d.name).collect();
        self.submitting = false;
        self.ready = true;
        self.processed.clone()
    }

    /// Submission failed: revert to `Staged` with the staged list intact.
    pub fn fail(&mut self) {
        self.submitting = false;
    }

    /// Display names of the currently staged documents, in insertion order.
    #[must_use]
    pub fn staged_names(&self) -> Vec<String> {
        self.staged.iter().map(|d| d.name.clone()).collect()
    }

    /// Number of staged documents.
    #[must_use]
    pub fn staged_count(&self) -> usize {
        self.staged.len()
    }

    /// Display names of the processed documents (empty before `Ready`).
    #[must_use]
    pub fn processed_names(&self) -> &[String] {
        &self.processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_add_filters_and_preserves_order() {
        let mut session = UploadSession::new();
        assert_eq!(session.phase(), UploadPhase::Empty);

        let added = session.add(paths(&["a.pdf", "skip.txt", "b.pdf"]));
        assert_eq!(added, 2);
        assert_eq!(session.phase(), UploadPhase::Staged);
        assert_eq!(session.staged_names(), vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_remove_by_index() {
        let mut session = UploadSession::new();
        session.add(paths(&["a.pdf", "b.pdf", "c.pdf"]));

        let removed = session.remove(1).unwrap();
        assert_eq!(removed.name, "b.pdf");
        assert_eq!(session.staged_names(), vec!["a.pdf", "c.pdf"]);

        // Out of range is a no-op
        assert!(session.remove(5).is_none());
        assert_eq!(session.staged_count(), 2);
    }

    #[test]
    fn test_remove_everything_returns_to_empty() {
        let mut session = UploadSession::new();
        session.add(paths(&["a.pdf"]));
        session.remove(0);
        assert_eq!(session.phase(), UploadPhase::Empty);
    }

    #[test]
    fn test_submit_empty_is_refused() {
        let mut session = UploadSession::new();
        assert!(session.begin_submit().is_none());
        assert_eq!(session.phase(), UploadPhase::Empty);
    }

    #[test]
    fn test_submit_success_keeps_names_only() {
        let mut session = UploadSession::new();
        session.add(paths(&["report.pdf", "notes.pdf"]));

        let snapshot = session.begin_submit().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(session.phase(), UploadPhase::Submitting);

        // Concurrent submission is blocked while in flight
        assert!(session.begin_submit().is_none());

        let names = session.complete();
        assert_eq!(names, vec!["report.pdf", "notes.pdf"]);
        assert_eq!(session.phase(), UploadPhase::Ready);
        assert_eq!(session.processed_names(), ["report.pdf", "notes.pdf"]);
        assert_eq!(session.staged_count(), 0);
    }

    #[test]
    fn test_submit_failure_preserves_staged_list() {
        let mut session = UploadSession::new();
        session.add(paths(&["report.pdf", "notes.pdf"]));

        session.begin_submit().unwrap();
        session.fail();

        assert_eq!(session.phase(), UploadPhase::Staged);
        assert_eq!(session.staged_names(), vec!["report.pdf", "notes.pdf"]);

        // The user can retry without re-selecting files
        assert!(session.begin_submit().is_some());
    }

    #[test]
    fn test_add_refused_while_submitting() {
        let mut session = UploadSession::new();
        session.add(paths(&["a.pdf"]));
        session.begin_submit().unwrap();

        assert_eq!(session.add(paths(&["b.pdf"])), 0);
        assert_eq!(session.staged_names(), vec!["a.pdf"]);
    }
}
