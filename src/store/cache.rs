//! Cached raw row payload.
//!
//! The cache stores the *input* of the normalization pass, not its output,
//! so every catalog shown to the user — fresh or offline — went through
//! the same build path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Store;
use crate::domain::RawRow;

/// Last-known-good row payload with its fetch timestamp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowCache {
    /// When the rows were fetched; absent for an empty cache
    #[serde(default)]
    pub fetched_at: Option<DateTime<Utc>>,

    /// The raw rows as received
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

impl RowCache {
    /// File name of the cache key
    pub const FILE: &'static str = "rows.json";

    /// Wrap freshly fetched rows with the current timestamp
    pub fn fresh(rows: Vec<RawRow>) -> Self {
        Self {
            fetched_at: Some(Utc::now()),
            rows,
        }
    }

    /// Check if the cache holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load from the store (empty cache when absent)
    pub async fn load(store: &Store) -> anyhow::Result<Self> {
        store.load_json(Self::FILE).await
    }

    /// Save to the store
    pub async fn save(&self, store: &Store) -> anyhow::Result<()> {
        store.save_json(Self::FILE, self).await
    }
}
