//! Per-request search values.

use serde::{Deserialize, Serialize};

use jobhub_core::{Category, Document};

/// Key under which a hit's category is serialized.
pub const CATEGORY_KEY: &str = "_category";
/// Key under which a hit's relevance score is serialized.
pub const SCORE_KEY: &str = "_relevanceScore";

/// One matching document, tagged with its category and relevance score.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub document: Document,
    #[serde(rename = "_category")]
    pub category: Category,
    #[serde(rename = "_relevanceScore")]
    pub relevance_score: f64,
}

impl SearchHit {
    /// Tag `document`. Stored fields named like the tags are dropped so each key appears once.
    pub fn new(mut document: Document, category: Category, relevance_score: f64) -> Self {
        document.remove(CATEGORY_KEY);
        document.remove(SCORE_KEY);
        Self { document, category, relevance_score }
    }
}

/// The page of hits a category returned plus its server-side match count.
#[derive(Debug, Clone)]
pub struct CategoryResultSet {
    pub category: Category,
    pub hits: Vec<SearchHit>,
    /// All matches in the store, not just the returned page.
    pub total_matches: u64,
}

impl CategoryResultSet {
    pub fn empty(category: Category) -> Self {
        Self { category, hits: Vec::new(), total_matches: 0 }
    }
}

/// Ordering applied to merged results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Relevance,
    Date,
}

impl SortBy {
    /// `date` selects date ordering; anything else, including nothing, is relevance.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("date") => SortBy::Date,
            _ => SortBy::Relevance,
        }
    }
}

/// Skip/limit window applied inside each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn stored_tag_fields_do_not_duplicate_keys() {
        let Value::Object(document) = json!({"_id": "j1", "_category": "legacy", "_relevanceScore": 99, "title": "Chef"}) else {
            unreachable!("object literal")
        };
        let hit = SearchHit::new(document, Category::Jobs, 1.5);
        let text = serde_json::to_string(&hit).unwrap();
        assert_eq!(text.matches("\"_category\"").count(), 1);
        assert_eq!(text.matches("\"_relevanceScore\"").count(), 1);

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["_category"], "jobs");
        assert_eq!(value["_relevanceScore"], 1.5);
        assert_eq!(value["title"], "Chef");
    }
}
