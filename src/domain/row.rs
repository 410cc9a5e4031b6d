//! Raw spreadsheet rows as delivered by the remote API.
//!
//! The upstream endpoint returns an array of JSON objects with no guaranteed
//! key set: columns get renamed, reordered, or dropped between syncs. A
//! [`RawRow`] therefore makes no schema promises; it only offers ordered
//! access to whatever keys the row happens to carry.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single spreadsheet row: arbitrary string keys, arbitrary cell values.
///
/// Key order is preserved as sent by the upstream, so "first matching key
/// wins" resolution is deterministic across builds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(pub serde_json::Map<String, Value>);

impl RawRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterate over (key, value) pairs in upstream order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of cells in the row
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the row carries no cells at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Coerce a cell value to text.
    ///
    /// Strings pass through, numbers and booleans are formatted, and
    /// everything else (null, nested arrays/objects) counts as empty —
    /// a nested value in a spreadsheet cell is noise, not content.
    pub fn cell_text(value: &Value) -> Cow<'_, str> {
        match value {
            Value::String(s) => Cow::Borrowed(s.as_str()),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Bool(b) => Cow::Owned(b.to_string()),
            _ => Cow::Borrowed(""),
        }
    }

    /// Build a row from string pairs (test and fixture helper)
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut map = serde_json::Map::new();
        for (k, v) in pairs {
            map.insert(k.to_string(), Value::String(v.to_string()));
        }
        Self(map)
    }
}
