use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;

use jobhub_core::document::{field_values, remove_path, value_text};
use jobhub_core::{Document, DocumentStore, Filter, FindOptions, Result};

/// An immutable, fully in-memory collection of documents for one category.
///
/// Filtering mirrors what a document database does with a case-insensitive
/// regex disjunction: array-valued fields match when any element, or the
/// space-joined array, matches.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Vec<Document>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn from_documents(documents: Vec<Document>) -> Self { Self { documents } }

    /// Load a file holding either a JSON array of objects or one object per line.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => String::from_utf8_lossy(&fs::read(path)?).to_string(),
        };
        Ok(Self::from_documents(parse_documents(&text)?))
    }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub(crate) fn extend(&mut self, other: MemoryStore) { self.documents.extend(other.documents); }

    fn matching<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = &'a Document> + 'a {
        self.documents.iter().filter(move |doc| matches(filter, doc))
    }
}

/// Parse a JSON array of documents, or JSON Lines when the text does not start with `[`.
pub fn parse_documents(text: &str) -> Result<Vec<Document>> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }
    let mut documents = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() { continue; }
        documents.push(serde_json::from_str(line)?);
    }
    Ok(documents)
}

/// Evaluate `filter` against a single document.
pub fn matches(filter: &Filter, doc: &Document) -> bool {
    match filter {
        Filter::Or(branches) => branches.iter().any(|branch| matches(branch, doc)),
        Filter::Matches { field, pattern } => {
            field_values(doc, field).into_iter().any(|value| value_matches(value, pattern))
        }
    }
}

fn value_matches(value: &Value, pattern: &Regex) -> bool {
    match value {
        Value::Object(_) | Value::Null => false,
        Value::Array(items) => {
            items.iter().any(|item| value_matches(item, pattern))
                || value_text(value).is_some_and(|text| pattern.is_match(&text))
        }
        other => value_text(other).is_some_and(|text| pattern.is_match(&text)),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, filter: &Filter, options: &FindOptions) -> Result<Vec<Document>> {
        let limit = options.limit.unwrap_or(usize::MAX);
        let docs = self
            .matching(filter)
            .skip(options.skip)
            .take(limit)
            .map(|doc| {
                let mut doc = doc.clone();
                for path in &options.exclude { remove_path(&mut doc, path); }
                doc
            })
            .collect();
        Ok(docs)
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        Ok(self.matching(filter).count() as u64)
    }
}
