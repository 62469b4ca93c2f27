//! Path Picker
//!
//! Terminal stand-in for a file-picker dialog: the user types a path into
//! the upload screen, and it expands to concrete files. A directory expands
//! to its PDF files (sorted by name); a file path passes through as-is, so
//! the staging filter in the session core is the one that rejects non-PDFs.

use std::path::{Path, PathBuf};

/// Expand a user-typed path into candidate files.
///
/// Returns an empty vector when the path does not exist or a directory
/// cannot be read.
pub fn expand_path(input: &str) -> Vec<PathBuf> {
    let expanded = shellexpand_home(input);
    let path = Path::new(expanded.as_ref());

    if path.is_dir() {
        let Ok(entries) = std::fs::read_dir(path) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file() && docchat_core::is_pdf(p))
            .collect();
        files.sort();
        files
    } else if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        Vec::new()
    }
}

/// Expand a leading `~` (bare or `~/...`) to the home directory.
fn shellexpand_home(input: &str) -> std::borrow::Cow<'_, str> {
    if let Some(home) = std::env::var_os("HOME") {
        if input == "~" {
            return std::borrow::Cow::Owned(home.to_string_lossy().into_owned());
        }
        if let Some(rest) = input.strip_prefix("~/") {
            return std::borrow::Cow::Owned(format!("{}/{rest}", home.to_string_lossy()));
        }
    }
    std::borrow::Cow::Borrowed(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_expand_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("report.pdf");
        fs::File::create(&file).unwrap();

        let expanded = expand_path(file.to_str().unwrap());
        assert_eq!(expanded, vec![file]);
    }

    #[test]
    fn test_expand_directory_filters_and_sorts() {
        let dir = tempdir().unwrap();
        fs::File::create(dir.path().join("b.pdf")).unwrap();
        fs::File::create(dir.path().join("a.pdf")).unwrap();
        fs::File::create(dir.path().join("notes.txt")).unwrap();

        let expanded = expand_path(dir.path().to_str().unwrap());
        assert_eq!(
            expanded,
            vec![dir.path().join("a.pdf"), dir.path().join("b.pdf")]
        );
    }

    #[test]
    fn test_bare_tilde_expands_to_home() {
        let home = std::env::var("HOME").unwrap();
        assert_eq!(shellexpand_home("~").as_ref(), home);
        assert_eq!(
            shellexpand_home("~/docs/a.pdf").as_ref(),
            format!("{home}/docs/a.pdf")
        );
        // A tilde mid-path or as part of a name stays untouched
        assert_eq!(shellexpand_home("~backup").as_ref(), "~backup");
    }

    #[test]
    fn test_expand_missing_path_is_empty() {
        assert!(expand_path("/nonexistent/nothing.pdf").is_empty());
    }

    #[test]
    fn test_non_pdf_file_passes_through() {
        // The session core's staging filter owns the rejection, so a typed
        // path to a .txt is passed along untouched.
        let dir = tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::File::create(&file).unwrap();

        let expanded = expand_path(file.to_str().unwrap());
        assert_eq!(expanded, vec![file]);
    }
}
