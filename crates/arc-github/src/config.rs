//! Client and cache configuration.

use std::time::Duration;

use url::Url;

use crate::error::TransportError;

/// Public GitHub REST API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com/";

/// REST API version pinned in the `X-GitHub-Api-Version` header.
pub const API_VERSION: &str = "2022-11-28";

/// Connection settings for [`crate::GitHubRest`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; must end with `/`.
    pub api_url: Url,
    /// Bearer token, if any.
    pub token: Option<String>,
    pub user_agent: String,
    /// Overall per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            token: None,
            user_agent: concat!("arc/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from the environment.
    ///
    /// The token comes from `GH_TOKEN`, falling back to `GITHUB_TOKEN`.
    /// `GH_HOST` names a GitHub Enterprise host whose API lives under
    /// `/api/v3/`.
    pub fn from_env() -> Result<Self, TransportError> {
        let mut config = ClientConfig {
            token: env_token(),
            ..ClientConfig::default()
        };
        if let Some(host) = non_empty_var("GH_HOST") {
            if host != "github.com" {
                config.api_url = enterprise_api_url(&host)?;
            }
        }
        Ok(config)
    }

    /// Replace the API root, validating it.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, TransportError> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }
}

/// Expiration and size settings for the status cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub ttl: Duration,
    /// Entries kept before the cache starts evicting.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Parse an API root, which must be http(s) and end with `/` so that
/// relative paths join beneath it.
pub fn parse_api_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw).map_err(|e| TransportError::InvalidUrl {
        url: raw.to_string(),
        detail: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TransportError::InvalidUrl {
            url: raw.to_string(),
            detail: format!("unsupported scheme {:?}", url.scheme()),
        });
    }
    if !url.as_str().ends_with('/') {
        return Err(TransportError::InvalidUrl {
            url: raw.to_string(),
            detail: "must end with '/'".to_string(),
        });
    }
    Ok(url)
}

fn enterprise_api_url(host: &str) -> Result<Url, TransportError> {
    parse_api_url(&format!("https://{host}/api/v3/"))
}

fn env_token() -> Option<String> {
    non_empty_var("GH_TOKEN").or_else(|| non_empty_var("GITHUB_TOKEN"))
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
