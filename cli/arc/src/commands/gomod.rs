//! `arc gomod`: list archived GitHub dependencies of Go modules.

use std::path::Path;

use anyhow::{Context, Result};
use arc_github::{GitHubRest, StatusClient};
use arc_scan::{ArchiveReport, ResolveOptions};

use crate::config::ArcConfig;

/// Scan `dir` and print every archived dependency to stdout.
///
/// Returns the number of matches printed.
pub fn run(dir: &Path, config: &ArcConfig, include_indirect: bool) -> Result<usize> {
    let client = build_client(config)?;
    scan(dir, config, include_indirect, &client, &ArchiveReport::stdout())
}

pub fn build_client(config: &ArcConfig) -> Result<StatusClient> {
    let rest = GitHubRest::new(&config.client_config()?);
    Ok(StatusClient::new(Box::new(rest), &config.cache_config()))
}

pub fn scan(
    dir: &Path,
    config: &ArcConfig,
    include_indirect: bool,
    client: &StatusClient,
    report: &ArchiveReport,
) -> Result<usize> {
    let mut options = ResolveOptions {
        include_indirect,
        ..ResolveOptions::default()
    };
    if let Some(name) = config.manifest_name() {
        options.manifest_name = name.to_string();
    }

    let count = arc_scan::resolve(dir, &options, client, report)
        .with_context(|| format!("scanning {}", dir.display()))?;
    tracing::debug!(count, "scan finished");
    Ok(count)
}
