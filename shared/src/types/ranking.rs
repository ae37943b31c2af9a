//! Ranked participant types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One ranked participant as received from the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    /// Raw score text, kept verbatim for display
    pub score: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, score: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: score.into(),
        }
    }

    /// Case-insensitive identity match used for highlight lookup
    pub fn matches_name(&self, query: &str) -> bool {
        self.name.to_lowercase() == query.to_lowercase()
    }
}

/// Ranking direction configured per sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Lowest score first (e.g. solve times)
    Ascending,
    /// Highest score first (e.g. points)
    Descending,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("Unknown sort direction: {s}")),
        }
    }
}

/// Entries ordered by score, rebuilt wholesale on every successful fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub entries: Vec<Entry>,
    pub direction: SortDirection,
    /// Mean of the parsable scores, 0 when there are none
    pub mean_score: f64,
    pub fetched_at: DateTime<Utc>,
}

impl Ranking {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Index of the first entry whose name matches `query`, ignoring case
    pub fn position_of(&self, query: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches_name(query))
    }
}
