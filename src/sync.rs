//! Sync orchestration with a stale-but-available policy.
//!
//! A sync fetches the row payload, persists it as the new cache, and builds
//! a complete catalog before anything is replaced. When the fetch fails the
//! previous cache keeps serving; when there is no cache either, the result
//! is an empty catalog with a notice — never an error. The CLI stays usable
//! offline for everything except pulling fresh data.

use tracing::{info, warn};

use crate::adapters::RowSource;
use crate::catalog::{build_catalog, Catalog};
use crate::store::{RowCache, Store};

/// Where the catalog rows came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    /// Freshly fetched from the remote source
    Fresh,

    /// Rebuilt from the local row cache
    Cache,

    /// No fresh data and no cache
    Empty,
}

/// Result of a sync: always a complete, valid catalog
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// The catalog built from whatever rows were available
    pub catalog: Catalog,

    /// Provenance of the rows
    pub origin: CatalogOrigin,

    /// User-facing notice when the data is not fresh
    pub notice: Option<String>,
}

/// Orchestrates fetch → cache → build
pub struct Syncer<S: RowSource> {
    source: S,
    store: Store,
}

impl<S: RowSource> Syncer<S> {
    /// Create a syncer over a row source and store
    pub fn new(source: S, store: Store) -> Self {
        Self { source, store }
    }

    /// Run one sync. Infallible by design: the worst outcome is an empty
    /// catalog with a notice.
    pub async fn sync(&self) -> SyncOutcome {
        match self.source.fetch_rows().await {
            Ok(rows) => {
                info!(rows = rows.len(), source = self.source.name(), "Fetched fresh rows");

                let cache = RowCache::fresh(rows);
                if let Err(e) = cache.save(&self.store).await {
                    // The fresh catalog is still good; only offline mode
                    // suffers until the next successful write
                    warn!("Failed to persist row cache: {:#}", e);
                }

                SyncOutcome {
                    catalog: build_catalog(&cache.rows),
                    origin: CatalogOrigin::Fresh,
                    notice: None,
                }
            }
            Err(e) => {
                warn!(source = self.source.name(), "Sync failed: {}", e);
                offline_outcome(&self.store, format!("Sync failed ({}). ", e)).await
            }
        }
    }

    /// The store this syncer persists into
    pub fn store(&self) -> &Store {
        &self.store
    }
}

/// Build a catalog from the local cache without touching the network
pub async fn cached_catalog(store: &Store) -> Catalog {
    match RowCache::load(store).await {
        Ok(cache) => build_catalog(&cache.rows),
        Err(e) => {
            warn!("Failed to load row cache: {:#}", e);
            Catalog::new()
        }
    }
}

/// Degraded outcome from the cache, with a notice explaining why
pub async fn offline_outcome(store: &Store, reason: String) -> SyncOutcome {
    let cache = match RowCache::load(store).await {
        Ok(cache) => cache,
        Err(e) => {
            warn!("Failed to load row cache: {:#}", e);
            RowCache::default()
        }
    };

    if cache.is_empty() {
        SyncOutcome {
            catalog: Catalog::new(),
            origin: CatalogOrigin::Empty,
            notice: Some(format!("{}No cached data available.", reason)),
        }
    } else {
        let fetched = cache
            .fetched_at
            .map(|t| format!(" (fetched {})", t.format("%Y-%m-%d %H:%M UTC")))
            .unwrap_or_default();

        SyncOutcome {
            catalog: build_catalog(&cache.rows),
            origin: CatalogOrigin::Cache,
            notice: Some(format!("{}Using offline data{}.", reason, fetched)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SourceError;
    use crate::domain::RawRow;
    use async_trait::async_trait;

    struct FixedSource(Vec<RawRow>);

    #[async_trait]
    impl RowSource for FixedSource {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RowSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
            Err(SourceError::Upstream("boom".to_string()))
        }
    }

    fn sample_rows() -> Vec<RawRow> {
        vec![RawRow::from_pairs([
            ("category", "Math"),
            ("link", "https://youtu.be/dQw4w9WgXcQ"),
        ])]
    }

    #[tokio::test]
    async fn test_successful_sync_is_fresh_and_caches() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = Store::new(temp.path());
        let syncer = Syncer::new(FixedSource(sample_rows()), store.clone());

        let outcome = syncer.sync().await;
        assert_eq!(outcome.origin, CatalogOrigin::Fresh);
        assert_eq!(outcome.catalog.len(), 1);
        assert!(outcome.notice.is_none());

        // The rows landed in the cache
        let cached = cached_catalog(&store).await;
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_sync_falls_back_to_cache() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = Store::new(temp.path());

        // Prime the cache with a successful sync
        Syncer::new(FixedSource(sample_rows()), store.clone())
            .sync()
            .await;

        let outcome = Syncer::new(FailingSource, store).sync().await;
        assert_eq!(outcome.origin, CatalogOrigin::Cache);
        assert_eq!(outcome.catalog.len(), 1);
        assert!(outcome.notice.unwrap().contains("offline"));
    }

    #[tokio::test]
    async fn test_failed_sync_without_cache_is_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = Store::new(temp.path());

        let outcome = Syncer::new(FailingSource, store).sync().await;
        assert_eq!(outcome.origin, CatalogOrigin::Empty);
        assert!(outcome.catalog.is_empty());
        assert!(outcome.notice.is_some());
    }
}
