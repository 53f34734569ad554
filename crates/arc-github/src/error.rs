//! GitHub client error types.

/// Errors raised by the transport that talks to the GitHub REST API.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The configured API URL is unusable.
    #[error("invalid api url {url:?}: {detail}")]
    InvalidUrl { url: String, detail: String },

    /// The request could not be sent or the connection failed.
    #[error("http GET {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Status { status: u16, url: String, body: String },

    /// The response body could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The response body is not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors returned by repository status lookups.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// The repository identity is not a single `owner/name` pair.
    #[error("invalid repo: {repo}")]
    InvalidIdentity { repo: String },

    /// The remote lookup failed. Failures are never cached.
    #[error("failed to fetch repo {repo}: {source}")]
    Fetch {
        repo: String,
        #[source]
        source: TransportError,
    },
}

/// Result type alias for status lookups.
pub type Result<T> = std::result::Result<T, StatusError>;
