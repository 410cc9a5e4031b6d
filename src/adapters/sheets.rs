//! Client for the spreadsheet macro endpoint.
//!
//! The endpoint returns the whole sheet as a JSON array of row objects
//! with arbitrary string keys. There is no schema version and no key
//! guarantee; validation here only establishes the payload's outer shape
//! and leaves per-cell tolerance to the catalog builder.

use async_trait::async_trait;
use serde_json::Value;

use super::{RowSource, SourceError};
use crate::domain::RawRow;

/// HTTP client for a spreadsheet-backed row API
pub struct SheetsClient {
    /// Macro endpoint URL
    api_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl SheetsClient {
    /// Create a client for the given endpoint
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The configured endpoint URL
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Validate the payload shape and extract rows.
    ///
    /// Accepts a top-level array (non-object elements are skipped); an
    /// object carrying an `error` member is an upstream-reported failure;
    /// anything else is an invalid payload.
    fn parse_rows(payload: Value) -> Result<Vec<RawRow>, SourceError> {
        match payload {
            Value::Array(values) => Ok(values
                .into_iter()
                .filter_map(|value| match value {
                    Value::Object(map) => Some(RawRow(map)),
                    _ => None,
                })
                .collect()),
            Value::Object(map) if map.contains_key("error") => {
                let message = map
                    .get("error")
                    .map(|v| RawRow::cell_text(v).into_owned())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "unspecified error".to_string());
                Err(SourceError::Upstream(message))
            }
            other => Err(SourceError::InvalidPayload(format!(
                "expected an array of rows, got {}",
                value_kind(&other)
            ))),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl RowSource for SheetsClient {
    fn name(&self) -> &str {
        "sheets"
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        let response = self
            .client
            .get(&self.api_url)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;
        Self::parse_rows(payload)
    }
}
