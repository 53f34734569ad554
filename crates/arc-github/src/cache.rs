//! In-memory time-bounded cache for repository status lookups.
//!
//! Entries expire a fixed TTL after they were written and are never served
//! once expired. Expired entries, and entries past the capacity bound, are
//! evicted inside the cache as part of normal reads and writes.

use mini_moka::sync::Cache;

use crate::config::CacheConfig;
use crate::repo::{RepoId, RepoStatus};

/// The cache used by [`crate::StatusClient`]. Cloning shares the same store.
pub type StatusCache = Cache<RepoId, RepoStatus>;

/// Build an empty status cache from its expiration settings.
pub fn status_cache(config: &CacheConfig) -> StatusCache {
    Cache::builder()
        .max_capacity(config.max_capacity)
        .time_to_live(config.ttl)
        .build()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use super::*;

    fn config(ttl_ms: u64) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_millis(ttl_ms),
            ..CacheConfig::default()
        }
    }

    fn status(archived: bool) -> RepoStatus {
        RepoStatus {
            archived,
            pushed_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn set_and_get() {
        let cache = status_cache(&CacheConfig::default());
        let repo = RepoId::parse("owner/repo").unwrap();

        assert!(cache.get(&repo).is_none());
        cache.insert(repo.clone(), status(true));
        assert_eq!(cache.get(&repo), Some(status(true)));
    }

    #[test]
    fn set_overwrites() {
        let cache = status_cache(&CacheConfig::default());
        let repo = RepoId::parse("owner/repo").unwrap();

        cache.insert(repo.clone(), status(false));
        cache.insert(repo.clone(), status(true));
        assert_eq!(cache.get(&repo), Some(status(true)));
    }

    #[test]
    fn expired_entries_are_not_served() {
        let cache = status_cache(&config(50));
        let repo = RepoId::parse("owner/repo").unwrap();

        cache.insert(repo.clone(), status(true));
        assert!(cache.get(&repo).is_some());
        thread::sleep(Duration::from_millis(150));

        assert!(cache.get(&repo).is_none());
    }

    #[test]
    fn rewrite_after_expiry_restarts_ttl() {
        let cache = status_cache(&config(50));
        let repo = RepoId::parse("owner/repo").unwrap();

        cache.insert(repo.clone(), status(false));
        thread::sleep(Duration::from_millis(150));
        assert!(cache.get(&repo).is_none());

        cache.insert(repo.clone(), status(true));
        assert_eq!(cache.get(&repo), Some(status(true)));
    }

    #[test]
    fn clones_share_entries() {
        let cache = status_cache(&CacheConfig::default());
        let other = cache.clone();
        let repo = RepoId::parse("owner/repo").unwrap();

        other.insert(repo.clone(), status(true));
        assert_eq!(cache.get(&repo), Some(status(true)));
    }

    #[test]
    fn concurrent_readers_and_writers() {
        let cache = Arc::new(status_cache(&CacheConfig::default()));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let repo = RepoId::new("owner", &format!("repo{}", i % 4)).unwrap();
                    for _ in 0..100 {
                        cache.insert(repo.clone(), status(i % 2 == 0));
                        assert!(cache.get(&repo).is_some());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        for i in 0..4 {
            let repo = RepoId::new("owner", &format!("repo{i}")).unwrap();
            assert!(cache.get(&repo).is_some());
        }
    }
}
