//! Sync Fallback Integration Tests
//!
//! Exercises the stale-but-available policy: a failed fetch degrades to
//! the cached catalog, total absence of data yields an empty catalog, and
//! watch progress survives catalog rebuilds.

use async_trait::async_trait;
use tempfile::TempDir;

use coursedeck::{
    CatalogOrigin, RawRow, RowSource, SourceError, Store, Syncer, WatchProgress,
};

/// Source that always returns the given rows
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

/// Source that always fails
struct DownSource;

#[async_trait]
impl RowSource for DownSource {
    fn name(&self) -> &str {
        "down"
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        Err(SourceError::Upstream("service unavailable".to_string()))
    }
}

fn sample_rows() -> Vec<RawRow> {
    serde_json::from_str(
        r#"[
            {"category": "Math", "code": "M1", "title": "Algebra",
             "link": "https://youtu.be/AAAAAAAAAAA"},
            {"title": "Geometry", "link": "https://youtu.be/BBBBBBBBBBB"}
        ]"#,
    )
    .unwrap()
}

#[tokio::test]
async fn test_fresh_sync_builds_and_caches() {
    let temp = TempDir::new().unwrap();
    let store = Store::new(temp.path());

    let outcome = Syncer::new(FixedSource(sample_rows()), store).sync().await;

    assert_eq!(outcome.origin, CatalogOrigin::Fresh);
    assert!(outcome.notice.is_none());
    assert_eq!(outcome.catalog.len(), 2);
}

#[tokio::test]
async fn test_outage_after_successful_sync_serves_cache() {
    let temp = TempDir::new().unwrap();
    let store = Store::new(temp.path());

    // First sync succeeds and populates the cache
    Syncer::new(FixedSource(sample_rows()), store.clone())
        .sync()
        .await;

    // Second sync hits an outage
    let outcome = Syncer::new(DownSource, store).sync().await;

    assert_eq!(outcome.origin, CatalogOrigin::Cache);
    assert_eq!(outcome.catalog.len(), 2);
    assert!(outcome.notice.unwrap().contains("offline"));

    // The cached catalog is structurally identical to the fresh one
    assert_eq!(outcome.catalog.categories[0].name, "Math");
}

#[tokio::test]
async fn test_outage_with_no_cache_yields_empty_catalog() {
    let temp = TempDir::new().unwrap();
    let store = Store::new(temp.path());

    let outcome = Syncer::new(DownSource, store).sync().await;

    assert_eq!(outcome.origin, CatalogOrigin::Empty);
    assert!(outcome.catalog.is_empty());
    assert!(outcome.catalog.categories.is_empty());
}

#[tokio::test]
async fn test_progress_survives_upstream_changes() {
    let temp = TempDir::new().unwrap();
    let store = Store::new(temp.path());

    // Sync and watch a lesson
    let outcome = Syncer::new(FixedSource(sample_rows()), store.clone())
        .sync()
        .await;
    let watched_id = outcome.catalog.items[0].id.clone();

    let mut progress = WatchProgress::load(&store).await.unwrap();
    progress.mark_watched(&watched_id);
    progress.save(&store).await.unwrap();

    // Upstream retitles the lesson and moves it to another category
    let changed: Vec<RawRow> = serde_json::from_str(
        r#"[
            {"category": "Advanced Math", "code": "M9", "title": "Algebra II",
             "link": "https://youtu.be/AAAAAAAAAAA"}
        ]"#,
    )
    .unwrap();

    let outcome = Syncer::new(FixedSource(changed), store.clone()).sync().await;
    let item = &outcome.catalog.items[0];

    // Same media id, so the watch record still applies
    assert_eq!(item.id, watched_id);
    let progress = WatchProgress::load(&store).await.unwrap();
    assert!(progress.is_watched(&item.id));
}

#[tokio::test]
async fn test_resync_replaces_catalog_wholesale() {
    let temp = TempDir::new().unwrap();
    let store = Store::new(temp.path());

    Syncer::new(FixedSource(sample_rows()), store.clone())
        .sync()
        .await;

    // A smaller payload fully replaces the previous catalog
    let reduced: Vec<RawRow> = serde_json::from_str(
        r#"[{"category": "Physics", "link": "https://youtu.be/CCCCCCCCCCC"}]"#,
    )
    .unwrap();

    let outcome = Syncer::new(FixedSource(reduced), store).sync().await;

    assert_eq!(outcome.catalog.len(), 1);
    assert_eq!(outcome.catalog.categories.len(), 1);
    assert_eq!(outcome.catalog.categories[0].name, "Physics");
}
