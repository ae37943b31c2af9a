//! HTTP feed client for gsx2json-style spreadsheet endpoints

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use shared::{ComponentId, Entry, FeedConfig, SheetId, component_debug};
use crate::error::{SyncerError, SyncerResult};
use crate::traits::FeedClient;
use crate::types::FetchFailure;

/// Real feed client using reqwest
#[derive(Clone)]
pub struct RealFeedClient {
    client: reqwest::Client,
    config: FeedConfig,
}

impl RealFeedClient {
    /// Create a feed client; fails on an unparsable base URL
    pub fn new(config: FeedConfig) -> SyncerResult<Self> {
        Url::parse(&config.base_url).map_err(|e| SyncerError::ConfigError {
            message: format!("Invalid feed URL '{}': {}", config.base_url, e),
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl FeedClient for RealFeedClient {
    async fn fetch_rows(&self, sheet: &SheetId) -> Result<Vec<Entry>, FetchFailure> {
        let params = self.config.query_params(sheet);

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchFailure::InvalidPayload(format!("Failed to parse response: {}", e)))?;

        let rows = parse_rows(&body, &self.config.name_field, &self.config.score_field)?;
        component_debug!(ComponentId::Syncer, sheet = %sheet, rows = rows.len(), "Fetched feed rows");
        Ok(rows)
    }
}

/// Extract entries from a feed body
///
/// The body must be an object with a `rows` array of objects. Each row needs
/// the name field; a missing score becomes an empty (unparsable) score.
pub fn parse_rows(body: &Value, name_field: &str, score_field: &str) -> Result<Vec<Entry>, FetchFailure> {
    let rows = body
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchFailure::InvalidPayload("response has no `rows` array".to_string()))?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let fields = row
                .as_object()
                .ok_or_else(|| FetchFailure::InvalidPayload(format!("row {} is not an object", index)))?;

            let name = fields
                .get(name_field)
                .and_then(field_text)
                .ok_or_else(|| FetchFailure::InvalidPayload(format!("row {} has no `{}` field", index, name_field)))?;

            let score = fields.get(score_field).and_then(field_text).unwrap_or_default();

            Ok(Entry::new(name, score))
        })
        .collect()
}

/// Text of a scalar cell; numbers keep their JSON rendering
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
