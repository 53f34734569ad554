//! Repository status lookups with transparent caching.

use crate::cache::{status_cache, StatusCache};
use crate::config::CacheConfig;
use crate::error::{Result, StatusError};
use crate::repo::{RepoId, RepoStatus};
use crate::rest::RestClient;

/// Looks up archived status for repositories, caching successful results.
///
/// Safe to share between threads. Concurrent misses for the same repository
/// may each reach the remote API; the last write wins in the cache.
pub struct StatusClient {
    rest: Box<dyn RestClient>,
    cache: StatusCache,
}

impl StatusClient {
    /// Wrap a REST transport with a fresh cache.
    pub fn new(rest: Box<dyn RestClient>, cache: &CacheConfig) -> Self {
        StatusClient {
            rest,
            cache: status_cache(cache),
        }
    }

    pub fn cache(&self) -> &StatusCache {
        &self.cache
    }

    /// Archived flag and last push date of `repo`.
    ///
    /// Failed fetches are not cached, so a later call retries.
    pub fn repo_status(&self, repo: &RepoId) -> Result<RepoStatus> {
        if let Some(cached) = self.cache.get(repo) {
            tracing::debug!(%repo, "using cached status");
            return Ok(cached);
        }

        let path = api_path(repo)?;
        let fetch_err = |source| StatusError::Fetch {
            repo: repo.to_string(),
            source,
        };

        let value = self.rest.get_json(&path).map_err(fetch_err)?;
        let status: RepoStatus = serde_json::from_value(value)
            .map_err(|e| fetch_err(crate::error::TransportError::Json(e)))?;

        self.cache.insert(repo.clone(), status.clone());
        Ok(status)
    }
}

/// Re-check the identity before building the request path.
fn api_path(repo: &RepoId) -> Result<String> {
    Ok(RepoId::parse(&repo.to_string())?.api_path())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::error::TransportError;

    /// Fake transport that answers from a closure and counts calls.
    struct MockRest<F> {
        calls: Arc<AtomicUsize>,
        respond: F,
    }

    impl<F> RestClient for MockRest<F>
    where
        F: Fn(&str) -> std::result::Result<serde_json::Value, TransportError> + Send + Sync,
    {
        fn get_json(&self, path: &str) -> std::result::Result<serde_json::Value, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.respond)(path)
        }
    }

    fn client<F>(respond: F) -> (StatusClient, Arc<AtomicUsize>)
    where
        F: Fn(&str) -> std::result::Result<serde_json::Value, TransportError>
            + Send
            + Sync
            + 'static,
    {
        let calls = Arc::new(AtomicUsize::new(0));
        let rest = MockRest {
            calls: Arc::clone(&calls),
            respond,
        };
        (
            StatusClient::new(Box::new(rest), &CacheConfig::default()),
            calls,
        )
    }

    fn api_failure() -> TransportError {
        TransportError::Status {
            status: 500,
            url: "https://api.github.com/repos/owner/repo".to_string(),
            body: "api error".to_string(),
        }
    }

    #[test]
    fn cache_hit_skips_remote() {
        let (client, calls) = client(|_| Err(api_failure()));
        let repo = RepoId::parse("owner/repo").unwrap();
        let want = RepoStatus {
            archived: true,
            pushed_at: "2024-01-01T00:00:00Z".to_string(),
        };
        client.cache().insert(repo.clone(), want.clone());

        assert_eq!(client.repo_status(&repo).unwrap(), want);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn api_failure_is_wrapped_and_not_cached() {
        let (client, calls) = client(|_| Err(api_failure()));
        let repo = RepoId::parse("owner/repo").unwrap();

        let err = client.repo_status(&repo).unwrap_err();
        assert!(matches!(err, StatusError::Fetch { .. }));
        assert!(err
            .to_string()
            .starts_with("failed to fetch repo owner/repo: HTTP 500"));
        assert!(client.cache().get(&repo).is_none());

        // Failures are retried on the next lookup
        assert!(client.repo_status(&repo).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn malformed_response_is_a_fetch_error() {
        let (client, _) = client(|_| Ok(json!({"archived": "maybe"})));
        let repo = RepoId::parse("owner/repo").unwrap();
        let err = client.repo_status(&repo).unwrap_err();
        assert!(matches!(
            err,
            StatusError::Fetch {
                source: TransportError::Json(_),
                ..
            }
        ));
    }

    #[test]
    fn success_requests_repo_path_and_caches() {
        let (client, calls) = client(|path| {
            assert_eq!(path, "repos/owner/repo");
            Ok(json!({"archived": false, "pushed_at": "2025-07-18T12:00:00Z"}))
        });
        let repo = RepoId::parse("owner/repo").unwrap();

        let got = client.repo_status(&repo).unwrap();
        assert!(!got.archived);
        assert_eq!(got.pushed_at, "2025-07-18T12:00:00Z");

        let cached = client.cache().get(&repo).unwrap();
        assert_eq!(cached, got);

        let again = client.repo_status(&repo).unwrap();
        assert_eq!(again, got);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_lookups_share_the_cache() {
        let (client, calls) = client(|_| Ok(json!({"archived": true, "pushed_at": "t"})));
        let repo = RepoId::parse("owner/repo").unwrap();
        client.repo_status(&repo).unwrap();

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| assert!(client.repo_status(&repo).unwrap().archived));
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
