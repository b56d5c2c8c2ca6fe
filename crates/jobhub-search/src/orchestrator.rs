use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use jobhub_core::config::SearchConfig;
use jobhub_core::{Category, DocumentStore, StoreSet};

use crate::aggregator::SearchResultsBuilder;
use crate::error::SearchError;
use crate::executor::{query_pattern, search_category};
use crate::registry::{CategoryConfig, Registry};
use crate::response::{Pagination, SearchResponseData};
use crate::types::{CategoryResultSet, Page, SortBy};

/// Raw request parameters as they arrive from a query string or the CLI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: Option<String>,
    pub categories: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
    pub combined: Option<String>,
    pub combined_pagination: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: Some(query.into()), ..Self::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub default_limit: usize,
    pub max_limit: usize,
    pub min_query_len: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self { default_limit: 10, max_limit: 100, min_query_len: 2 }
    }
}

impl From<&SearchConfig> for SearchLimits {
    fn from(config: &SearchConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
            min_query_len: config.min_query_len,
        }
    }
}

/// Validated, defaulted request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub categories: Option<String>,
    pub limit: usize,
    pub page: usize,
    pub sort: SortBy,
    pub combined: bool,
    pub combined_pagination: bool,
}

impl SearchParams {
    pub fn parse(request: &SearchRequest, limits: &SearchLimits) -> Result<Self, SearchError> {
        let query = request.query.as_deref().map(str::trim).unwrap_or_default();
        if query.chars().count() < limits.min_query_len {
            return Err(SearchError::Validation(format!(
                "Search query must be at least {} characters long",
                limits.min_query_len
            )));
        }
        let limit = positive(request.limit.as_deref()).unwrap_or(limits.default_limit).min(limits.max_limit);
        Ok(Self {
            query: query.to_string(),
            categories: request.categories.clone(),
            limit,
            page: positive(request.page.as_deref()).unwrap_or(1),
            sort: SortBy::parse_lenient(request.sort.as_deref()),
            combined: flag(request.combined.as_deref()),
            combined_pagination: flag(request.combined_pagination.as_deref()),
        })
    }

    /// Per-category window for this page.
    pub fn window(&self) -> Page {
        Page { skip: (self.page - 1).saturating_mul(self.limit), limit: self.limit }
    }
}

fn positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok()).filter(|n| *n > 0)
}

fn flag(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1"))
}

/// Fans a query out to every selected category and assembles the response.
#[derive(Clone)]
pub struct GlobalSearch {
    registry: Arc<Registry>,
    stores: StoreSet,
    limits: SearchLimits,
}

impl GlobalSearch {
    pub fn new(registry: Registry, stores: StoreSet, limits: SearchLimits) -> Self {
        Self { registry: Arc::new(registry), stores, limits }
    }

    pub fn from_config(config: &SearchConfig, stores: StoreSet) -> jobhub_core::Result<Self> {
        let registry = Registry::from_specs(&config.categories)?;
        Ok(Self::new(registry, stores, SearchLimits::from(config)))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Search the requested categories (all when none are named).
    pub async fn global_search(&self, request: &SearchRequest) -> Result<SearchResponseData, SearchError> {
        let params = SearchParams::parse(request, &self.limits)?;
        let categories = self.registry.select(params.categories.as_deref());
        self.run(&params, &categories).await
    }

    /// Search a single category named by its wire name.
    pub async fn category_search(&self, category: &str, request: &SearchRequest) -> Result<SearchResponseData, SearchError> {
        let params = SearchParams::parse(request, &self.limits)?;
        let category = category
            .parse::<Category>()
            .ok()
            .filter(|c| self.registry.get(*c).is_some())
            .ok_or_else(|| SearchError::Validation(format!("Unknown search category: {category}")))?;
        self.run(&params, &[category]).await
    }

    async fn run(&self, params: &SearchParams, categories: &[Category]) -> Result<SearchResponseData, SearchError> {
        let started = Instant::now();
        let pattern = query_pattern(&params.query)
            .map_err(|e| SearchError::Validation(format!("Search query cannot be used: {e}")))?;
        let page = params.window();

        // Resolve every binding before spawning so a wiring fault leaves no task behind.
        let mut bound: Vec<(Arc<CategoryConfig>, Arc<dyn DocumentStore>)> = Vec::with_capacity(categories.len());
        for category in categories {
            let config = self.registry.get(*category).cloned().ok_or_else(|| {
                SearchError::Orchestration(format!("category {category} is not registered"))
            })?;
            let store = self.stores.get(category).cloned().ok_or_else(|| {
                error!(%category, "no store bound for category");
                SearchError::Orchestration(format!("no store bound for category {category}"))
            })?;
            bound.push((config, store));
        }

        let tasks: Vec<_> = bound
            .into_iter()
            .map(|(config, store)| {
                let query = params.query.clone();
                let pattern = pattern.clone();
                tokio::spawn(async move { search_category(store.as_ref(), &config, &query, &pattern, page).await })
            })
            .collect();
        let joined = futures::future::join_all(tasks).await;

        let mut builder = SearchResultsBuilder::new();
        for (category, outcome) in categories.iter().copied().zip(joined) {
            let set = match outcome {
                Ok(set) => set,
                Err(e) if e.is_panic() => {
                    warn!(%category, "category search task panicked, returning no results");
                    CategoryResultSet::empty(category)
                }
                Err(e) => {
                    error!(%category, error = %e, "category search task did not complete");
                    return Err(SearchError::Orchestration(format!(
                        "search task for category {category} did not complete: {e}"
                    )));
                }
            };
            builder.add_results(set.category, set.hits, set.total_matches);
        }
        let results = builder.build();

        info!(
            query = %params.query,
            categories = categories.len(),
            total = results.total(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search completed"
        );
        let pagination = Pagination { page: params.page, limit: params.limit, total: results.total() };
        Ok(results.format_response(&params.query, params.combined, params.sort, pagination, params.combined_pagination))
    }
}
