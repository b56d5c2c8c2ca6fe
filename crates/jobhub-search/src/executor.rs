use regex::{Regex, RegexBuilder};
use std::time::Instant;
use tracing::{debug, warn};

use jobhub_core::{DocumentStore, Filter, FindOptions};

use crate::error::CategorySearchError;
use crate::registry::CategoryConfig;
use crate::scorer::score;
use crate::types::{CategoryResultSet, Page, SearchHit};

/// Case-insensitive literal substring pattern for a query.
pub fn query_pattern(query: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&regex::escape(query.trim())).case_insensitive(true).build()
}

/// Search one category: paged fetch plus an unpaged count over the same
/// OR-filter, then score and tag every fetched document.
///
/// Never fails. A store error is logged and the category contributes an
/// empty result with a count of zero.
pub async fn search_category(
    store: &dyn DocumentStore,
    config: &CategoryConfig,
    query: &str,
    pattern: &Regex,
    page: Page,
) -> CategoryResultSet {
    let started = Instant::now();
    match try_search_category(store, config, query, pattern, page).await {
        Ok(set) => {
            debug!(
                category = %config.category,
                hits = set.hits.len(),
                total = set.total_matches,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "category search done"
            );
            set
        }
        Err(source) => {
            let err = CategorySearchError { category: config.category, source };
            warn!(category = %config.category, error = %err, "category search failed, returning no results");
            CategoryResultSet::empty(config.category)
        }
    }
}

async fn try_search_category(
    store: &dyn DocumentStore,
    config: &CategoryConfig,
    query: &str,
    pattern: &Regex,
    page: Page,
) -> jobhub_core::Result<CategoryResultSet> {
    let filter = Filter::any_field_matches(&config.searchable, pattern);
    let options = FindOptions { skip: page.skip, limit: Some(page.limit), exclude: config.excluded.clone() };
    let (documents, total_matches) = futures::try_join!(store.find(&filter, &options), store.count(&filter))?;
    let hits = documents
        .into_iter()
        .map(|document| {
            let relevance_score = score(&document, query, &config.weights);
            SearchHit::new(document, config.category, relevance_score)
        })
        .collect();
    Ok(CategoryResultSet { category: config.category, hits, total_matches })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jobhub_core::config::default_categories;
    use jobhub_core::{Category, Document, Error};
    use jobhub_store::MemoryStore;
    use serde_json::json;

    struct BrokenStore;

    #[async_trait]
    impl DocumentStore for BrokenStore {
        async fn find(&self, _filter: &Filter, _options: &FindOptions) -> jobhub_core::Result<Vec<Document>> {
            Err(Error::Store("connection refused".to_string()))
        }
        async fn count(&self, _filter: &Filter) -> jobhub_core::Result<u64> {
            Ok(7)
        }
    }

    fn jobs_config() -> CategoryConfig {
        let spec = default_categories().into_iter().find(|s| s.name == Category::Jobs).unwrap();
        CategoryConfig::from_spec(&spec).unwrap()
    }

    fn store() -> MemoryStore {
        let docs = (0..12)
            .map(|i| match json!({"title": format!("Developer {i}"), "applicants": ["u1"]}) {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            })
            .collect();
        MemoryStore::from_documents(docs)
    }

    #[test]
    fn pattern_is_literal_and_case_insensitive() {
        let p = query_pattern(" c++ (senior) ").unwrap();
        assert!(p.is_match("Senior C++ (Senior) dev"));
        assert!(!p.is_match("c senior"));
    }

    #[tokio::test]
    async fn total_reflects_all_matches_not_the_page() {
        let pattern = query_pattern("developer").unwrap();
        let set = search_category(&store(), &jobs_config(), "developer", &pattern, Page { skip: 10, limit: 5 }).await;
        assert_eq!(set.total_matches, 12);
        assert_eq!(set.hits.len(), 2);
        assert!(set.hits.iter().all(|h| h.category == Category::Jobs && h.relevance_score > 0.0));
        assert!(set.hits.iter().all(|h| !h.document.contains_key("applicants")));
    }

    #[tokio::test]
    async fn stored_tag_fields_are_replaced_by_the_hit_tags() {
        let doc = match json!({"title": "Developer", "_category": "legacy", "_relevanceScore": "high"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let store = MemoryStore::from_documents(vec![doc]);
        let pattern = query_pattern("developer").unwrap();
        let set = search_category(&store, &jobs_config(), "developer", &pattern, Page { skip: 0, limit: 5 }).await;
        let hit = &set.hits[0];
        assert!(!hit.document.contains_key("_category"));
        assert!(!hit.document.contains_key("_relevanceScore"));
        let value = serde_json::to_value(hit).unwrap();
        assert_eq!(value["_category"], "jobs");
        assert_eq!(value["_relevanceScore"], 6.0);
    }

    #[tokio::test]
    async fn store_failure_degrades_to_empty() {
        let pattern = query_pattern("developer").unwrap();
        let set = search_category(&BrokenStore, &jobs_config(), "developer", &pattern, Page { skip: 0, limit: 5 }).await;
        assert!(set.hits.is_empty());
        assert_eq!(set.total_matches, 0);
    }
}
