//! jobhub-search
//!
//! Federated search over the per-category document stores: a registry of
//! searchable fields and weights, a per-category executor, a relevance
//! scorer, a result aggregator and the orchestrator that fans a query out
//! to every selected category.
pub mod aggregator;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod registry;
pub mod response;
pub mod scorer;
pub mod types;

pub use aggregator::{SearchResults, SearchResultsBuilder};
pub use error::{CategorySearchError, SearchError};
pub use orchestrator::{GlobalSearch, SearchLimits, SearchParams, SearchRequest};
pub use registry::{CategoryConfig, Registry, WeightedField};
pub use response::{ApiResponse, Outcome, Pagination, Results, SearchResponseData};
pub use types::{CategoryResultSet, Page, SearchHit, SortBy};
