//! Watch-progress tracking.
//!
//! Progress is keyed purely by lesson id, so it survives catalog rebuilds:
//! a lesson watched under one catalog version stays watched even when
//! upstream data later moves it to a different category or retitles it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Store;
use crate::catalog::SubjectGroup;

/// Set of watched lesson ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchProgress {
    #[serde(default)]
    watched: BTreeSet<String>,
}

/// Completion counts for one subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStats {
    /// Watched lessons in the subject
    pub done: usize,

    /// Total lessons in the subject
    pub total: usize,
}

impl ProgressStats {
    /// Completion percentage, rounded
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.done as f64 / self.total as f64) * 100.0).round() as u32
        }
    }
}

impl WatchProgress {
    /// File name of the progress key
    pub const FILE: &'static str = "progress.json";

    /// Mark a lesson watched; returns true if it was newly marked
    pub fn mark_watched(&mut self, id: &str) -> bool {
        self.watched.insert(id.to_string())
    }

    /// Check if a lesson has been watched
    pub fn is_watched(&self, id: &str) -> bool {
        self.watched.contains(id)
    }

    /// Number of watched lessons
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    /// Check if nothing has been watched yet
    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Completion counts for a subject's lesson list
    pub fn subject_stats(&self, subject: &SubjectGroup) -> ProgressStats {
        let done = subject
            .items
            .iter()
            .filter(|item| self.is_watched(&item.id))
            .count();

        ProgressStats {
            done,
            total: subject.items.len(),
        }
    }

    /// Load from the store (empty when absent)
    pub async fn load(store: &Store) -> anyhow::Result<Self> {
        store.load_json(Self::FILE).await
    }

    /// Save to the store
    pub async fn save(&self, store: &Store) -> anyhow::Result<()> {
        store.save_json(Self::FILE, self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LessonItem, LessonKind};

    fn subject_with(ids: &[&str]) -> SubjectGroup {
        SubjectGroup {
            id: "M1".to_string(),
            display_name: "Algebra".to_string(),
            items: ids
                .iter()
                .map(|id| LessonItem {
                    id: id.to_string(),
                    kind: LessonKind::Video,
                    source: None,
                    is_live: false,
                    title: String::new(),
                    instructor: String::new(),
                    subject_id: "M1".to_string(),
                    subject_name: "Algebra".to_string(),
                    category: "Math".to_string(),
                    slide_link: None,
                    document_link: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_mark_and_check() {
        let mut progress = WatchProgress::default();
        assert!(!progress.is_watched("a"));

        assert!(progress.mark_watched("a"));
        assert!(progress.is_watched("a"));

        // Second mark is a no-op
        assert!(!progress.mark_watched("a"));
        assert_eq!(progress.len(), 1);
    }

    #[test]
    fn test_subject_stats() {
        let mut progress = WatchProgress::default();
        progress.mark_watched("a");
        progress.mark_watched("c");

        let stats = progress.subject_stats(&subject_with(&["a", "b", "c", "d"]));
        assert_eq!(stats.done, 2);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.percent(), 50);
    }

    #[test]
    fn test_percent_of_empty_subject() {
        let progress = WatchProgress::default();
        let stats = progress.subject_stats(&subject_with(&[]));
        assert_eq!(stats.percent(), 0);
    }

    #[tokio::test]
    async fn test_progress_survives_reload() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = Store::new(temp.path());

        let mut progress = WatchProgress::default();
        progress.mark_watched("dQw4w9WgXcQ");
        progress.save(&store).await.unwrap();

        let loaded = WatchProgress::load(&store).await.unwrap();
        assert!(loaded.is_watched("dQw4w9WgXcQ"));
    }
}
