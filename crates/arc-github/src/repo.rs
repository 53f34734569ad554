//! Repository identities and the status snapshot fetched for them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, StatusError};

/// Module path prefix of GitHub-hosted Go modules.
pub const GITHUB_MODULE_PREFIX: &str = "github.com/";

/// A normalized `owner/name` GitHub repository identity.
///
/// Never contains the host prefix and always has exactly one separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    /// Build an identity from its two segments.
    pub fn new(owner: &str, name: &str) -> Result<Self> {
        if !is_segment(owner) || !is_segment(name) {
            return Err(StatusError::InvalidIdentity {
                repo: format!("{owner}/{name}"),
            });
        }
        Ok(RepoId {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Parse an `owner/name` string.
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] => Self::new(owner, name),
            _ => Err(StatusError::InvalidIdentity {
                repo: full_name.to_string(),
            }),
        }
    }

    /// Derive the identity from a Go module path such as
    /// `github.com/owner/name/v2/sub`.
    ///
    /// Returns `None` for paths outside GitHub and for paths with fewer than
    /// three segments.
    pub fn from_module_path(module_path: &str) -> Option<Self> {
        if !module_path.starts_with(GITHUB_MODULE_PREFIX) {
            return None;
        }
        let mut parts = module_path.split('/').skip(1);
        let owner = parts.next()?;
        let name = parts.next()?;
        Self::new(owner, name).ok()
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// REST path of the repository resource, relative to the API root.
    pub fn api_path(&self) -> String {
        format!("repos/{}/{}", self.owner, self.name)
    }

    /// Browser URL of the repository.
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

fn is_segment(s: &str) -> bool {
    !s.is_empty() && !s.contains('/')
}

/// Archived flag and last push time of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStatus {
    pub archived: bool,
    /// ISO 8601 timestamp; empty for repositories that were never pushed.
    #[serde(default, deserialize_with = "nullable_string")]
    pub pushed_at: String,
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
