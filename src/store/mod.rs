//! Local persistence for offline operation and user state.
//!
//! A flat key/value store: one file per key under the app home directory,
//! JSON for structured values and plain text for the notepad. Every load
//! is absent-tolerant — a missing file means the default value, never an
//! error — so each key can be read and written independently.
//!
//! # Storage Layout
//!
//! ```text
//! ~/.coursedeck/
//! ├── rows.json          # Last-known-good raw row payload
//! ├── progress.json      # Watched lesson id set
//! ├── last_viewed.json   # Snapshot of the last opened lesson
//! ├── settings.json      # Playback and theme preferences
//! └── note.txt           # Freeform notepad text
//! ```

pub mod cache;
pub mod prefs;
pub mod progress;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

pub use cache::RowCache;
pub use prefs::{LastViewed, Settings, Theme};
pub use progress::WatchProgress;

/// File name of the notepad key
pub const NOTE_FILE: &str = "note.txt";

/// Handle to the on-disk key/value store
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the store at the configured home directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::config::home_dir()?))
    }

    /// The store's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a key's backing file
    pub fn path_for(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create store directory: {}", self.root.display()))
    }

    /// Load a JSON value, falling back to its default when the key is
    /// absent
    pub async fn load_json<T>(&self, file: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        Ok(self.load_json_opt(file).await?.unwrap_or_default())
    }

    /// Load a JSON value, `None` when the key is absent
    pub async fn load_json_opt<T>(&self, file: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let path = self.path_for(file);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(value))
    }

    /// Save a JSON value under a key
    pub async fn save_json<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        self.ensure_root().await?;

        let path = self.path_for(file);
        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Load the notepad text (empty when absent)
    pub async fn load_note(&self) -> Result<String> {
        let path = self.path_for(NOTE_FILE);
        if !path.exists() {
            return Ok(String::new());
        }

        fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Save the notepad text
    pub async fn save_note(&self, text: &str) -> Result<()> {
        self.ensure_root().await?;

        let path = self.path_for(NOTE_FILE);
        fs::write(&path, text)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Remove a key (missing keys are fine)
    pub async fn remove(&self, file: &str) -> Result<()> {
        let path = self.path_for(file);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}
