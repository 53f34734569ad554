//! Recursive manifest discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ScanError};

/// File name of Go module manifests.
pub const GO_MOD: &str = "go.mod";

/// Find every file named `file_name` below `root`.
///
/// Symlinks are not followed. Any error during the walk aborts it. Paths are
/// returned as the walk yields them, minus a leading `./`, so scanning `.`
/// reports `a/go.mod` rather than `./a/go.mod`. Order is unspecified.
pub fn find_manifests(root: &Path, file_name: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|source| ScanError::Traversal {
            root: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() || entry.file_name() != file_name {
            continue;
        }

        let path = entry
            .path()
            .strip_prefix(".")
            .unwrap_or_else(|_| entry.path())
            .to_path_buf();
        tracing::debug!(path = %path.display(), "found {file_name} file");
        files.push(path);
    }

    Ok(files)
}
