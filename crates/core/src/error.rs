use crate::models::RecordId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("duplicate record id {id} in {source_label}")]
    DuplicateId { id: RecordId, source_label: String },

    #[error("invalid record at position {position} in {source_label}: {reason}")]
    InvalidRecord {
        position: usize,
        source_label: String,
        reason: String,
    },

    #[error("corpus file skipped: {}: {reason}", path.display())]
    Skipped { path: PathBuf, reason: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl SearchError {
    pub fn status_code(&self) -> u16 {
        match self {
            SearchError::Validation(_) => 400,
            SearchError::NotFound(_) => 404,
            SearchError::Internal(_) => 500,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SearchError::Validation(_))
    }
}

impl From<CorpusError> for SearchError {
    fn from(value: CorpusError) -> Self {
        SearchError::Internal(value.to_string())
    }
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
