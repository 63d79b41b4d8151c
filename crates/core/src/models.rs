use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_LIMIT: usize = 5;
pub const MIN_TERM_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    pub body: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordDraft {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(alias = "question")]
    pub title: String,
    #[serde(default, alias = "answer")]
    pub body: String,
    pub category: String,
    #[serde(default, alias = "keywords")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

impl RecordDraft {
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            title: self.title,
            body: self.body,
            category: self.category,
            tags: self.tags,
            source: self.source,
            last_updated: self.last_updated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub category: Option<String>,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            category: None,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: Record,
    pub relevance_score: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SearchOutcome {
    pub results: Vec<ScoredRecord>,
    pub total_candidates: usize,
    pub categories_found: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryListing {
    pub categories: Vec<CategorySummary>,
    pub total_categories: usize,
    pub total_records: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Recommendation {
    pub record: Record,
    pub relevance_score: u32,
    pub matched: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorpusFingerprint {
    pub source: String,
    pub checksum: String,
    pub record_count: usize,
    pub loaded_at: DateTime<Utc>,
}
