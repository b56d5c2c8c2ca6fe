//! Relevance scoring of a single document against the query.
//!
//! For each weighted field the first matching tier wins:
//!
//! | tier        | condition                               | contribution      |
//! |-------------|-----------------------------------------|-------------------|
//! | exact       | field text equals the query             | `2.0 * w`         |
//! | contains    | query is a substring of the field       | `w` (+`0.5 * w` when the field starts with it) |
//! | whole word  | query words appear as a run of words    | `0.8 * w`         |
//!
//! Comparison is on lowercased text; arrays are joined with spaces and
//! numbers or booleans use their string form. Absent or null fields score 0.

use jobhub_core::document::field_text;
use jobhub_core::Document;

use crate::registry::WeightedField;

const EXACT_FACTOR: f64 = 2.0;
const PREFIX_BONUS: f64 = 0.5;
const WORD_FACTOR: f64 = 0.8;

/// Sum of every weighted field's contribution. Pure and deterministic.
pub fn score(document: &Document, query: &str, weights: &[WeightedField]) -> f64 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0.0;
    }
    let query_words = words(&query);
    weights.iter().map(|w| field_score(document, &query, &query_words, w)).sum()
}

fn field_score(document: &Document, query: &str, query_words: &[&str], weighted: &WeightedField) -> f64 {
    let Some(text) = field_text(document, &weighted.field) else { return 0.0 };
    let text = text.to_lowercase();
    let w = weighted.weight;
    if text == query {
        w * EXACT_FACTOR
    } else if text.contains(query) {
        if text.starts_with(query) { w + w * PREFIX_BONUS } else { w }
    } else if contains_run(&words(&text), query_words) {
        w * WORD_FACTOR
    } else {
        0.0
    }
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()).collect()
}

fn contains_run(haystack: &[&str], needle: &[&str]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobhub_core::Category;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test documents are objects"),
        }
    }

    fn weights(pairs: &[(&str, f64)]) -> Vec<WeightedField> {
        pairs
            .iter()
            .map(|(f, w)| WeightedField { field: Category::Jobs.field(f).unwrap(), weight: *w })
            .collect()
    }

    #[test]
    fn exact_match_doubles_the_weight() {
        let d = doc(json!({"title": "Developer"}));
        assert_eq!(score(&d, "developer", &weights(&[("title", 3.0)])), 6.0);
    }

    #[test]
    fn prefix_containment_earns_the_bonus() {
        let d = doc(json!({"title": "Developer advocate"}));
        assert_eq!(score(&d, "developer", &weights(&[("title", 2.0)])), 3.0);
    }

    #[test]
    fn inner_containment_scores_the_plain_weight() {
        let d = doc(json!({"title": "Senior Developer"}));
        assert_eq!(score(&d, "developer", &weights(&[("title", 2.0)])), 2.0);
    }

    #[test]
    fn word_run_across_punctuation_scores_the_word_tier() {
        let d = doc(json!({"title": "Full-stack engineer"}));
        assert_eq!(score(&d, "full stack", &weights(&[("title", 1.0)])), 0.8);
    }

    #[test]
    fn fields_sum_and_misses_contribute_nothing() {
        let d = doc(json!({"title": "Rust Developer", "skills": ["rust", "tokio"], "description": null}));
        let w = weights(&[("title", 3.0), ("skills", 2.0), ("description", 1.0), ("location", 0.8)]);
        // title: prefix containment 3 + 1.5; skills "rust tokio": prefix containment 2 + 1.
        assert_eq!(score(&d, "Rust", &w), 7.5);
        assert_eq!(score(&d, "python", &w), 0.0);
    }

    #[test]
    fn numbers_and_booleans_are_compared_as_text() {
        let d = doc(json!({"salary": {"min": 4500}, "status": true}));
        let w = weights(&[("salary.min", 1.0), ("status", 1.0)]);
        assert_eq!(score(&d, "4500", &w), 2.0);
        assert_eq!(score(&d, "true", &w), 2.0);
    }

    #[test]
    fn query_is_trimmed_and_case_folded() {
        let d = doc(json!({"title": "DEVELOPER"}));
        assert_eq!(score(&d, "  Developer ", &weights(&[("title", 1.0)])), 2.0);
    }

    #[test]
    fn tiers_are_monotonic_for_one_field() {
        let w = weights(&[("title", 1.5)]);
        let exact = score(&doc(json!({"title": "data engineer"})), "data engineer", &w);
        let contains = score(&doc(json!({"title": "data engineering lead"})), "data engineer", &w);
        let word = score(&doc(json!({"title": "data-engineer role"})), "data engineer", &w);
        let miss = score(&doc(json!({"title": "chef"})), "data engineer", &w);
        assert!(exact > contains && contains > word && word > miss && miss == 0.0);
        assert_eq!(word, 1.5 * 0.8);
    }

    #[test]
    fn repeated_calls_agree() {
        let d = doc(json!({"title": "Rust Developer", "skills": ["rust"]}));
        let w = weights(&[("title", 3.0), ("skills", 2.0)]);
        let first = score(&d, "rust", &w);
        for _ in 0..10 {
            assert_eq!(score(&d, "rust", &w), first);
        }
    }
}
