//! Integration Test: UI Isolation
//!
//! The core crate promises "zero dependencies on ratatui, crossterm, or any
//! other UI framework" so it can drive any surface or run headless.
//!
//! **Policy**: `core/src` MUST NOT reference ratatui or crossterm, and the
//! core manifest MUST NOT declare them.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, resolved from this crate's manifest directory.
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

#[test]
fn test_core_sources_do_not_reference_ui_frameworks() {
    let core_src = workspace_root().join("core").join("src");
    assert!(core_src.exists(), "core/src not found");

    let mut violations = Vec::new();

    for entry in walkdir::WalkDir::new(&core_src)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let content = match fs::read_to_string(entry.path()) {
            Ok(c) => c,
            Err(_) => continue,
        };

        for (idx, line) in content.lines().enumerate() {
            // Skip comments
            let code_part = line.split("//").next().unwrap_or(line);

            if code_part.contains("ratatui") || code_part.contains("crossterm") {
                violations.push(format!(
                    "{}:{} - UI framework reference: {}",
                    entry.path().display(),
                    idx + 1,
                    line.trim()
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "\nFound {} UI framework reference(s) in core sources:\n{}\n",
        violations.len(),
        violations.join("\n")
    );
}

#[test]
fn test_core_manifest_does_not_declare_ui_frameworks() {
    let manifest = workspace_root().join("core").join("Cargo.toml");
    let content = fs::read_to_string(&manifest).expect("core/Cargo.toml not found");

    for (idx, line) in content.lines().enumerate() {
        let code_part = line.split('#').next().unwrap_or(line);
        assert!(
            !code_part.contains("ratatui") && !code_part.contains("crossterm"),
            "core/Cargo.toml:{} declares a UI framework: {}",
            idx + 1,
            line.trim()
        );
    }
}
