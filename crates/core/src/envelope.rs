use crate::error::SearchError;
use crate::models::{CategoryListing, CategorySummary, Record, ScoredRecord, SearchOutcome};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use tracing::error;

#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(serialize_with = "rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    pub status: u16,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
            status: 200,
        }
    }

    pub fn failure(error: &SearchError, internal_message: &str) -> Self {
        let message = match error {
            SearchError::Validation(message) | SearchError::NotFound(message) => message.clone(),
            SearchError::Internal(details) => {
                error!(details = %details, "{internal_message}");
                internal_message.to_string()
            }
        };

        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
            status: error.status_code(),
        }
    }

    pub fn from_result(result: Result<T, SearchError>, internal_message: &str) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::failure(&error, internal_message),
        }
    }
}

fn rfc3339_millis<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchPayload {
    pub query: String,
    pub total_results: usize,
    pub faqs: Vec<ScoredRecord>,
    pub categories_found: Vec<String>,
}

impl SearchPayload {
    pub fn new(query: impl Into<String>, outcome: SearchOutcome) -> Self {
        Self {
            query: query.into(),
            total_results: outcome.total_candidates,
            faqs: outcome.results,
            categories_found: outcome.categories_found,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesPayload {
    pub categories: Vec<CategorySummary>,
    pub total_categories: usize,
    pub total_faqs: usize,
}

impl From<CategoryListing> for CategoriesPayload {
    fn from(value: CategoryListing) -> Self {
        Self {
            categories: value.categories,
            total_categories: value.total_categories,
            total_faqs: value.total_records,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomPayload {
    pub faqs: Vec<Record>,
    pub total_available: usize,
}
