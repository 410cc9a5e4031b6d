//! Row-source adapters for the upstream catalog data.
//!
//! The catalog builder consumes an ordered row sequence and does not care
//! where it came from; adapters provide that sequence. The production
//! source is a spreadsheet-backed web API ([`SheetsClient`]), and tests
//! substitute scripted sources through the same trait.

pub mod sheets;

use async_trait::async_trait;
use thiserror::Error;

// Re-export the production source
pub use sheets::SheetsClient;

use crate::domain::RawRow;

/// Errors from a row source.
///
/// None of these are fatal to the application: the sync layer degrades to
/// the cached catalog and reports a notice instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Upstream reported an error: {0}")]
    Upstream(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Trait for row sources
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Fetch the full ordered row sequence
    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError>;
}
