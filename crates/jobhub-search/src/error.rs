use thiserror::Error;

use jobhub_core::Category;

/// Failures that abort a whole search request.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Malformed request; no store was queried.
    #[error("{0}")]
    Validation(String),

    /// The fan-out itself could not be carried out.
    #[error("Search failed: {0}")]
    Orchestration(String),
}

impl SearchError {
    pub fn is_validation(&self) -> bool {
        matches!(self, SearchError::Validation(_))
    }
}

/// A single category's query failed. Logged and downgraded to an empty result, never returned.
#[derive(Debug, Error)]
#[error("search in category {category} failed: {source}")]
pub struct CategorySearchError {
    pub category: Category,
    #[source]
    pub source: jobhub_core::Error,
}
