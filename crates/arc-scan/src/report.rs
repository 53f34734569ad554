//! Thread-safe printing and counting of archived matches.

use std::io::Write;
use std::path::Path;

use arc_github::{RepoId, RepoStatus};
use parking_lot::Mutex;

/// Collects archived-dependency matches from concurrent lookups.
///
/// Each match is written as one line and counted under a single lock, so
/// lines from different threads never interleave.
pub struct ArchiveReport {
    state: Mutex<ReportState>,
}

struct ReportState {
    out: Box<dyn Write + Send>,
    count: usize,
}

impl ArchiveReport {
    /// Report to an arbitrary writer.
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        ArchiveReport {
            state: Mutex::new(ReportState { out, count: 0 }),
        }
    }

    /// Report to standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Print one match and count it.
    pub fn record(&self, manifest: &Path, repo: &RepoId, status: &RepoStatus, indirect: bool) {
        let line = format_match(manifest, repo, &status.pushed_at, indirect);
        let mut state = self.state.lock();
        if let Err(e) = writeln!(state.out, "{line}") {
            tracing::warn!(error = %e, "could not write report line");
        }
        state.count += 1;
    }

    /// Number of matches recorded so far.
    pub fn count(&self) -> usize {
        self.state.lock().count
    }
}

/// `<manifest>: https://github.com/<owner>/<name> (last push: <ts>)[ // indirect]`
pub fn format_match(manifest: &Path, repo: &RepoId, pushed_at: &str, indirect: bool) -> String {
    let suffix = if indirect { " // indirect" } else { "" };
    format!(
        "{}: {} (last push: {pushed_at}){suffix}",
        manifest.display(),
        repo.html_url()
    )
}
