//! Document References
//!
//! A document reference is the client-held handle to a user-selected PDF file:
//! the display name shown in the UI plus the on-disk source that is read when
//! the staged set is submitted. Until submission the payload stays on disk;
//! after a successful upload only the display name is retained.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Content type accepted by the staging filter and sent with every upload part.
pub const PDF_MIME: &str = "application/pdf";

/// One file staged for upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Display name (also sent as the multipart file name).
    pub name: String,
    /// On-disk source, read at submission time.
    pub source: PathBuf,
}

impl DocumentRef {
    /// Build a reference from a path, rejecting non-PDF content types.
    ///
    /// Both input routes (file picker and drop target) funnel through this
    /// filter, so a dropped `.txt` is excluded exactly like a picked one.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        if !is_pdf(&path) {
            return None;
        }
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { name, source: path })
    }
}

/// PDF content-type check, by extension, case-insensitive.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}
