use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use jobhub_core::{Category, DocumentStore, StoreSet};

use crate::memory::MemoryStore;

/// Build one [`MemoryStore`] per category from the `<category>.json` /
/// `<category>.jsonl` files directly under `data_dir`.
///
/// Files whose stem is not a category wire name are skipped. Categories
/// without a file are bound to an empty store so every category stays searchable.
pub fn load_dir(data_dir: &Path) -> Result<StoreSet> {
    if !data_dir.is_dir() {
        anyhow::bail!("data directory {} does not exist", data_dir.display());
    }
    let mut stores: BTreeMap<Category, MemoryStore> = BTreeMap::new();
    for file_path in list_json_files(data_dir) {
        let Some(stem) = file_path.file_stem().and_then(|s| s.to_str()) else { continue };
        let Ok(category) = stem.parse::<Category>() else {
            warn!(file = %file_path.display(), "skipping file that does not name a category");
            continue;
        };
        let store = MemoryStore::from_json_file(&file_path)
            .with_context(|| format!("loading {}", file_path.display()))?;
        info!(%category, documents = store.len(), file = %file_path.display(), "loaded documents");
        stores.entry(category).or_default().extend(store);
    }

    let mut set = StoreSet::new();
    for category in Category::ALL {
        let store = stores.remove(&category).unwrap_or_else(|| {
            info!(%category, "no data file, serving an empty collection");
            MemoryStore::new()
        });
        set.insert(category, Arc::new(store) as Arc<dyn DocumentStore>);
    }
    Ok(set)
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).max_depth(1).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
        let path = entry.path();
        if matches!(path.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) { files.push(path.to_path_buf()); }
    }
    files.sort(); files
}
