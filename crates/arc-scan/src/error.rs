//! Scan error types.

use std::path::PathBuf;

/// Errors that can occur while scanning a project tree.
///
/// Only [`ScanError::Traversal`] aborts a scan; the per-manifest variants are
/// logged and the manifest is skipped.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The directory walk could not proceed.
    #[error("error walking directories under {}: {source}", root.display())]
    Traversal {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A manifest could not be read.
    #[error("could not open {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest could not be parsed.
    #[error("failed to parse {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: arc_gomod::ModFileError,
    },
}

/// Result type alias for scan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
