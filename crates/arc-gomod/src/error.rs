//! go.mod parse error types.

/// Errors that can occur while parsing a `go.mod` file.
#[derive(Debug, thiserror::Error)]
pub enum ModFileError {
    /// The file contents are not valid UTF-8.
    #[error("{file}: invalid UTF-8: {source}")]
    NotUtf8 {
        file: String,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A line could not be interpreted.
    #[error("{file}:{line}: {detail}")]
    Syntax {
        file: String,
        line: usize,
        detail: String,
    },

    /// A parenthesized block was opened but never closed.
    #[error("{file}:{line}: unterminated {verb} block")]
    UnterminatedBlock {
        file: String,
        line: usize,
        verb: String,
    },
}

/// Result type alias for go.mod parsing.
pub type Result<T> = std::result::Result<T, ModFileError>;
