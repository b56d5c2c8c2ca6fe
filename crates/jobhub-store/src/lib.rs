//! jobhub-store
//!
//! In-memory document stores backing the search service, plus a loader that
//! builds one store per category from a directory of JSON files.
pub mod loader;
pub mod memory;

pub use loader::load_dir;
pub use memory::MemoryStore;
