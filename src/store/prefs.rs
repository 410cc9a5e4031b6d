//! User preferences and the last-viewed snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Store;
use crate::domain::LessonItem;

fn default_autoplay() -> bool {
    true
}

/// Playback and theme preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Start playback automatically when a lesson opens
    #[serde(default = "default_autoplay")]
    pub autoplay: bool,

    /// Delay before autoplay kicks in, in seconds
    #[serde(default)]
    pub autoplay_delay_seconds: u64,

    /// UI theme
    #[serde(default)]
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            autoplay: default_autoplay(),
            autoplay_delay_seconds: 0,
            theme: Theme::default(),
        }
    }
}

/// UI theme choice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}

impl Settings {
    /// File name of the settings key
    pub const FILE: &'static str = "settings.json";

    /// Load from the store (defaults when absent)
    pub async fn load(store: &Store) -> anyhow::Result<Self> {
        store.load_json(Self::FILE).await
    }

    /// Save to the store
    pub async fn save(&self, store: &Store) -> anyhow::Result<()> {
        store.save_json(Self::FILE, self).await
    }
}

/// Snapshot of the most recently opened lesson.
///
/// The snapshot keeps the full item so the CLI can still describe it when
/// the lesson has disappeared from the current catalog; the id is the join
/// key for looking it up fresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastViewed {
    /// The lesson as it looked when opened
    pub item: LessonItem,

    /// When it was opened
    pub viewed_at: DateTime<Utc>,
}

impl LastViewed {
    /// File name of the last-viewed key
    pub const FILE: &'static str = "last_viewed.json";

    /// Snapshot a lesson now
    pub fn now(item: LessonItem) -> Self {
        Self {
            item,
            viewed_at: Utc::now(),
        }
    }

    /// Load from the store (`None` when absent)
    pub async fn load(store: &Store) -> anyhow::Result<Option<Self>> {
        store.load_json_opt(Self::FILE).await
    }

    /// Save to the store
    pub async fn save(&self, store: &Store) -> anyhow::Result<()> {
        store.save_json(Self::FILE, self).await
    }
}
