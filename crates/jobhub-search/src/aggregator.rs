//! Per-request collection of category results and the merged views over it.
//!
//! Results are gathered through [`SearchResultsBuilder`] and frozen into a
//! [`SearchResults`] value. Merged pagination slices the union of the pages
//! each category already fetched, so page 2 of the merged view is drawn from
//! page 2 of every category rather than from a global top-K. Callers rely on
//! that behaviour; it is not an exact global ranking.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use std::cmp::Reverse;
use std::collections::BTreeMap;

use jobhub_core::{Category, Document};

use crate::response::{Pagination, Results, SearchResponseData};
use crate::types::{CategoryResultSet, SearchHit, SortBy};

#[derive(Debug, Default)]
pub struct SearchResultsBuilder {
    entries: Vec<CategoryResultSet>,
}

impl SearchResultsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a category's hits and total. A second call for the same
    /// category replaces the first one in place.
    pub fn add_results(&mut self, category: Category, hits: Vec<SearchHit>, total_matches: u64) -> &mut Self {
        let set = CategoryResultSet { category, hits, total_matches };
        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(existing) => *existing = set,
            None => self.entries.push(set),
        }
        self
    }

    pub fn build(self) -> SearchResults {
        SearchResults { entries: self.entries }
    }
}

/// Immutable results of one search request, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    entries: Vec<CategoryResultSet>,
}

impl SearchResults {
    pub fn get(&self, category: Category) -> Option<&CategoryResultSet> {
        self.entries.iter().find(|e| e.category == category)
    }

    pub fn total_counts(&self) -> BTreeMap<Category, u64> {
        self.entries.iter().map(|e| (e.category, e.total_matches)).collect()
    }

    /// Sum of server-side match counts across categories.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.total_matches).sum()
    }

    /// Every hit in one list. Both orderings are stable, so ties keep insertion order.
    pub fn combined(&self, sort: SortBy) -> Vec<&SearchHit> {
        let mut hits: Vec<&SearchHit> = self.entries.iter().flat_map(|e| e.hits.iter()).collect();
        match sort {
            SortBy::Relevance => hits.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score)),
            SortBy::Date => hits.sort_by_key(|h| Reverse(timestamp_millis(&h.document))),
        }
        hits
    }

    pub fn paginated_combined(&self, sort: SortBy, skip: usize, limit: usize) -> Vec<&SearchHit> {
        self.combined(sort).into_iter().skip(skip).take(limit).collect()
    }

    pub fn format_response(
        &self,
        query: &str,
        combined: bool,
        sort: SortBy,
        pagination: Pagination,
        combined_pagination: bool,
    ) -> SearchResponseData {
        let results = if combined {
            let hits = if combined_pagination {
                let skip = pagination.page.saturating_sub(1).saturating_mul(pagination.limit);
                self.paginated_combined(sort, skip, pagination.limit)
            } else {
                self.combined(sort)
            };
            Results::Combined { combined: hits.into_iter().cloned().collect() }
        } else {
            Results::PerCategory(self.entries.iter().map(|e| (e.category, e.hits.clone())).collect())
        };
        SearchResponseData {
            query: query.to_string(),
            results,
            total_counts: self.total_counts(),
            pagination,
        }
    }
}

/// Creation time, else update time, else the epoch, in milliseconds.
pub fn timestamp_millis(document: &Document) -> i64 {
    ["createdAt", "updatedAt"]
        .iter()
        .find_map(|key| document.get(*key).and_then(parse_timestamp))
        .unwrap_or(0)
}

fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.timestamp_millis())
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc().timestamp_millis())
            }),
        Value::Object(map) => map.get("$date").and_then(parse_timestamp),
        _ => None,
    }
}
