use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{Category, Document, Filter, FindOptions};

/// Read-only access to the documents of one category.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents matching `filter`, after skip/limit and field exclusion.
    async fn find(&self, filter: &Filter, options: &FindOptions) -> Result<Vec<Document>>;

    /// Number of documents matching `filter`, ignoring any paging.
    async fn count(&self, filter: &Filter) -> Result<u64>;
}

/// One store per category.
pub type StoreSet = BTreeMap<Category, Arc<dyn DocumentStore>>;
