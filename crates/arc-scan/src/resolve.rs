//! Concurrent archived-status resolution over a project tree.
//!
//! One lookup task is spawned per repository on rayon's global pool and the
//! call returns only after every task has finished. Lookup failures are
//! logged and do not affect other repositories.

use std::path::Path;

use arc_github::{RepoId, StatusClient};

use crate::error::Result;
use crate::extract::{extract_dependencies, DependencyIndex, Reference};
use crate::locator::{find_manifests, GO_MOD};
use crate::report::ArchiveReport;

/// Options for a resolution run.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Report repositories that are only pulled in indirectly.
    pub include_indirect: bool,
    /// Manifest file name to search for.
    pub manifest_name: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            include_indirect: false,
            manifest_name: GO_MOD.to_string(),
        }
    }
}

/// Scan `root` for manifests and report every archived GitHub dependency.
///
/// Returns the number of matches this call reported; a report shared between
/// runs keeps its running total in [`ArchiveReport::count`]. Only a failed
/// directory walk is an error.
pub fn resolve(
    root: &Path,
    options: &ResolveOptions,
    client: &StatusClient,
    report: &ArchiveReport,
) -> Result<usize> {
    let manifests = find_manifests(root, &options.manifest_name)?;
    let index = extract_dependencies(&manifests);

    if index.is_empty() {
        tracing::debug!(
            "no github.com modules found in any {} file",
            options.manifest_name
        );
        return Ok(0);
    }

    Ok(check_index(&index, options, client, report))
}

/// Look up every repository in `index` that passes the indirect policy and
/// record the archived ones. Returns the number of matches recorded by this
/// call.
pub fn check_index(
    index: &DependencyIndex,
    options: &ResolveOptions,
    client: &StatusClient,
    report: &ArchiveReport,
) -> usize {
    let before = report.count();
    rayon::scope(|s| {
        for (repo, refs) in index {
            if !options.include_indirect && only_indirect(refs) {
                tracing::debug!(%repo, "skipping indirect-only dependency");
                continue;
            }
            s.spawn(move |_| check_repo(repo, refs, options.include_indirect, client, report));
        }
    });

    report.count() - before
}

fn check_repo(
    repo: &RepoId,
    refs: &[Reference],
    include_indirect: bool,
    client: &StatusClient,
    report: &ArchiveReport,
) {
    let status = match client.repo_status(repo) {
        Ok(status) => status,
        Err(e) => {
            tracing::debug!("error fetching repo {repo}: {e}");
            return;
        }
    };

    if !status.archived {
        return;
    }

    for reference in refs {
        if !include_indirect && reference.indirect {
            continue;
        }
        report.record(&reference.manifest, repo, &status, reference.indirect);
    }
}

fn only_indirect(refs: &[Reference]) -> bool {
    refs.iter().all(|r| r.indirect)
}
