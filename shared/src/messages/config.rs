//! Configuration types
//!
//! Feed location, sheet catalog, polling cadence and server settings.

use std::collections::HashSet;
use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::errors::{SharedError, SharedResult};
use crate::types::{SheetId, SortDirection};

/// Default gsx2json-compatible endpoint
pub const DEFAULT_FEED_URL: &str = "https://gsx2json.com/api";

/// Default spreadsheet document
pub const DEFAULT_DOCUMENT_ID: &str = "1l1qBCg3_K3kUaOC_7il6_pzrH_wm_Wj4CaSxsNGQsfk";

/// Remote feed location and row field mapping
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeedConfig {
    pub base_url: String,
    pub document_id: String,
    /// Row field holding the participant name
    pub name_field: String,
    /// Row field holding the score (string or number)
    pub score_field: String,
    pub request_timeout: Duration,
}

impl FeedConfig {
    /// Query parameters for one sheet request
    pub fn query_params(&self, sheet: &SheetId) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.document_id.clone()),
            ("sheet", sheet.as_str().to_string()),
            ("columns", "false".to_string()),
        ]
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_URL.to_string(),
            document_id: DEFAULT_DOCUMENT_ID.to_string(),
            name_field: "Nom".to_string(),
            score_field: "Score".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// One selectable sheet and its ranking direction
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SheetConfig {
    pub id: SheetId,
    pub direction: SortDirection,
}

impl SheetConfig {
    pub fn new(id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            id: SheetId::new(id),
            direction,
        }
    }

    /// Parse `NAME` or `NAME:asc|desc`; a bare name ranks ascending
    pub fn parse(spec: &str) -> SharedResult<Self> {
        let (name, direction) = match spec.rsplit_once(':') {
            Some((name, dir)) => {
                let direction = dir.parse::<SortDirection>().map_err(|_| SharedError::InvalidConfig {
                    field: "sheet".to_string(),
                    value: spec.to_string(),
                })?;
                (name.trim(), direction)
            }
            None => (spec.trim(), SortDirection::Ascending),
        };

        if name.is_empty() {
            return Err(SharedError::InvalidConfig {
                field: "sheet".to_string(),
                value: spec.to_string(),
            });
        }

        Ok(Self::new(name, direction))
    }
}

/// Polling cadence and retry budget
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SyncConfig {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Retry delay is `2^attempt * backoff_base`
    pub backoff_base: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(30_000),
            max_attempts: 3,
            backoff_base: Duration::from_millis(1_000),
        }
    }
}

/// Board server configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BoardConfig {
    pub bind_port: u16,
    /// Sheet catalog; the first entry is selected at startup
    pub sheets: Vec<SheetConfig>,
    pub feed: FeedConfig,
    pub sync: SyncConfig,
}

impl BoardConfig {
    /// Check the catalog is non-empty and free of duplicate sheet ids
    pub fn validate(&self) -> SharedResult<()> {
        if self.sheets.is_empty() {
            return Err(SharedError::InvalidConfig {
                field: "sheets".to_string(),
                value: "[]".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for sheet in &self.sheets {
            if !seen.insert(sheet.id.clone()) {
                return Err(SharedError::InvalidConfig {
                    field: "sheets".to_string(),
                    value: format!("duplicate sheet {}", sheet.id),
                });
            }
        }

        if self.sync.interval.is_zero() {
            return Err(SharedError::InvalidConfig {
                field: "interval".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }

    pub fn initial_sheet(&self) -> Option<&SheetConfig> {
        self.sheets.first()
    }

    pub fn find_sheet(&self, id: &SheetId) -> Option<&SheetConfig> {
        self.sheets.iter().find(|s| &s.id == id)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            bind_port: 8080,
            sheets: vec![SheetConfig::new("Rubiks1", SortDirection::Ascending)],
            feed: FeedConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}
