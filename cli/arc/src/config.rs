//! `.arc.toml` loading and translation into client settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use arc_github::{CacheConfig, ClientConfig};
use serde::{Deserialize, Serialize};

/// File name searched for from the scan directory upward.
pub const CONFIG_FILE: &str = ".arc.toml";

/// Optional per-project settings. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArcConfig {
    pub github: GitHubSection,
    pub cache: CacheSection,
    pub scan: ScanSection,
}

/// `[github]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GitHubSection {
    /// REST API root, e.g. `https://ghe.example.com/api/v3/`.
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// `[cache]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CacheSection {
    pub ttl_secs: Option<u64>,
    /// Upper bound on cached repositories.
    pub max_entries: Option<u64>,
}

/// `[scan]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScanSection {
    /// Manifest file name to look for instead of `go.mod`.
    pub manifest: Option<String>,
}

impl ArcConfig {
    /// Search upward from `start_dir` for `.arc.toml`, returning the parsed
    /// file and the path it was read from.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config = Self::parse(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, candidate)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Like [`ArcConfig::find_and_load`], falling back to defaults.
    pub fn load_or_default(start_dir: &Path) -> Result<Self> {
        match Self::find_and_load(start_dir)? {
            Some((config, path)) => {
                tracing::debug!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Client settings: environment first, then this file on top.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("reading GitHub environment")?;
        if let Some(api_url) = &self.github.api_url {
            config = config
                .with_api_url(api_url)
                .context("invalid [github] api-url")?;
        }
        if let Some(secs) = self.github.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn cache_config(&self) -> CacheConfig {
        let mut config = CacheConfig::default();
        if let Some(secs) = self.cache.ttl_secs {
            config.ttl = Duration::from_secs(secs);
        }
        if let Some(entries) = self.cache.max_entries {
            config.max_capacity = entries;
        }
        config
    }

    /// Manifest file name, if overridden.
    pub fn manifest_name(&self) -> Option<&str> {
        self.scan.manifest.as_deref()
    }
}
