//! Uniform JSON envelope returned by every search entry point.

use serde::Serialize;
use std::collections::BTreeMap;

use jobhub_core::Category;

use crate::error::SearchError;
use crate::types::SearchHit;

pub const SUCCESS_MESSAGE: &str = "Search completed successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub result: Outcome,
    pub msg: String,
    pub data: Option<T>,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

impl<T> ApiResponse<T> {
    pub fn success(msg: impl Into<String>, data: T, total_count: u64) -> Self {
        Self { result: Outcome::Success, msg: msg.into(), data: Some(data), total_count }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self { result: Outcome::Error, msg: msg.into(), data: None, total_count: 0 }
    }
}

impl ApiResponse<SearchResponseData> {
    pub fn from_search(result: Result<SearchResponseData, SearchError>) -> Self {
        match result {
            Ok(data) => {
                let total = data.pagination.total;
                Self::success(SUCCESS_MESSAGE, data, total)
            }
            Err(e) => Self::error(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    /// Sum of every searched category's match count.
    pub total: u64,
}

/// Hits either merged into one list or grouped by category.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Results {
    Combined { combined: Vec<SearchHit> },
    PerCategory(BTreeMap<Category, Vec<SearchHit>>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponseData {
    pub query: String,
    pub results: Results,
    pub total_counts: BTreeMap<Category, u64>,
    pub pagination: Pagination,
}
