//! Building the repository → references index from manifests.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use arc_github::RepoId;
use arc_gomod::ModFile;

use crate::error::ScanError;

/// One mention of a repository inside a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Manifest that mentions the repository.
    pub manifest: PathBuf,
    /// Whether the mention is an `// indirect` requirement.
    pub indirect: bool,
}

/// Every GitHub repository mentioned across a set of manifests, with the
/// places that mention it.
///
/// Keyed by repository so iteration is deterministic; references keep the
/// order in which they were found.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    repos: BTreeMap<RepoId, Vec<Reference>>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `require` entry. Non-GitHub and malformed paths are ignored.
    pub fn add_requirement(&mut self, manifest: &Path, module_path: &str, indirect: bool) {
        let Some(repo) = RepoId::from_module_path(module_path) else {
            return;
        };
        self.repos.entry(repo).or_default().push(Reference {
            manifest: manifest.to_path_buf(),
            indirect,
        });
    }

    /// Record the target of a `replace` directive.
    ///
    /// Adds a direct reference unless the manifest already references the
    /// repository.
    pub fn add_replacement(&mut self, manifest: &Path, new_path: &str) {
        let Some(repo) = RepoId::from_module_path(new_path) else {
            return;
        };
        let refs = self.repos.entry(repo).or_default();
        if refs.iter().any(|r| r.manifest == manifest) {
            return;
        }
        refs.push(Reference {
            manifest: manifest.to_path_buf(),
            indirect: false,
        });
    }

    /// Record every GitHub dependency of a parsed manifest.
    pub fn add_modfile(&mut self, manifest: &Path, modfile: &ModFile) {
        for req in &modfile.require {
            self.add_requirement(manifest, &req.module.path, req.indirect);
        }
        for rep in &modfile.replace {
            self.add_replacement(manifest, &rep.new.path);
        }
    }

    pub fn get(&self, repo: &RepoId) -> Option<&[Reference]> {
        self.repos.get(repo).map(Vec::as_slice)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, RepoId, Vec<Reference>> {
        self.repos.iter()
    }

    /// Number of distinct repositories.
    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

impl<'a> IntoIterator for &'a DependencyIndex {
    type Item = (&'a RepoId, &'a Vec<Reference>);
    type IntoIter = btree_map::Iter<'a, RepoId, Vec<Reference>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read and parse each manifest, collecting its GitHub dependencies.
///
/// Unreadable or unparsable manifests are logged and skipped.
pub fn extract_dependencies(manifests: &[PathBuf]) -> DependencyIndex {
    let mut index = DependencyIndex::new();

    for path in manifests {
        match load_modfile(path) {
            Ok(modfile) => index.add_modfile(path, &modfile),
            Err(e) => tracing::debug!("{e}"),
        }
    }

    index
}

fn load_modfile(path: &Path) -> Result<ModFile, ScanError> {
    let data = std::fs::read(path).map_err(|source| ScanError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path.to_string_lossy();
    arc_gomod::parse(&name, &data).map_err(|source| ScanError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}
