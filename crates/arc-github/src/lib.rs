//! GitHub repository status client.
//!
//! Answers one question for the scanner: is a given `owner/name` repository
//! archived, and when was it last pushed to. Lookups go through an
//! in-memory [`StatusCache`] owned by the [`StatusClient`], so repeated lookups
//! of the same repository within the TTL cost a single API request.
//!
//! # Architecture
//!
//! - [`RestClient`]: the `GET path -> JSON` transport seam
//! - [`GitHubRest`]: `ureq` implementation against the GitHub REST API
//! - [`StatusClient`]: cache-first lookup, validation, and decoding

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod repo;
pub mod rest;

// Re-exports for convenience.
pub use cache::{status_cache, StatusCache};
pub use client::StatusClient;
pub use config::{CacheConfig, ClientConfig};
pub use error::{Result, StatusError, TransportError};
pub use repo::{RepoId, RepoStatus, GITHUB_MODULE_PREFIX};
pub use rest::{GitHubRest, RestClient};
