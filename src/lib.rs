//! coursedeck - Spreadsheet-backed course catalog engine
//!
//! Fetches a tabular course catalog from a spreadsheet-backed API,
//! normalizes its loosely-structured rows into a category → subject →
//! lesson hierarchy, and tracks watch progress locally.
//!
//! # Architecture
//!
//! The system is built around a pure normalization core:
//! - Rows are fetched (or loaded from the offline cache) as-is
//! - One synchronous pass builds a complete, immutable Catalog
//! - The new catalog replaces the previous one wholesale; progress is
//!   joined by lesson id and survives rebuilds
//!
//! # Modules
//!
//! - `adapters`: Row sources (spreadsheet API client)
//! - `catalog`: The normalization engine (columns, media, memory, builder)
//! - `domain`: Data structures (RawRow, LessonItem)
//! - `store`: Local persistence (cache, progress, settings, notepad)
//! - `sync`: Fetch-cache-rebuild orchestration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Fetch and rebuild the catalog
//! coursedeck sync
//!
//! # Browse subjects with progress
//! coursedeck dashboard
//!
//! # Open a lesson (marks it watched)
//! coursedeck open dQw4w9WgXcQ
//!
//! # Pick up where you left off
//! coursedeck resume
//! ```

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod store;
pub mod sync;

// Re-export main types at crate root for convenience
pub use adapters::{RowSource, SheetsClient, SourceError};
pub use catalog::{build_catalog, Catalog, CategoryGroup, SubjectGroup};
pub use domain::{LessonItem, LessonKind, MediaSource, RawRow};
pub use store::{LastViewed, RowCache, Settings, Store, Theme, WatchProgress};
pub use sync::{CatalogOrigin, SyncOutcome, Syncer};
