//! Startup plumbing shared by the `jobhub-server` and `jobhub-search` binaries.
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jobhub_core::config::{resolve_with_base, AppConfig, Config};
use jobhub_search::GlobalSearch;

/// Install the global subscriber writing to stderr. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the layered configuration for `env_name` (or `RUST_ENV`).
pub fn load_config(env_name: Option<&str>) -> Result<AppConfig> {
    let config = match env_name {
        Some(name) => Config::load_for_env(name),
        None => Config::load(),
    }
    .context("loading configuration")?;
    let app = config.app().context("validating configuration")?;
    info!(env = config.env_name(), "configuration loaded");
    Ok(app)
}

/// Data directory from the flag or the configuration, relative paths
/// resolved against the working directory.
pub fn data_dir(app: &AppConfig, flag: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    Ok(match flag {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => cwd.join(dir),
        None => resolve_with_base(&cwd, &app.data.dir),
    })
}

/// Load every category store from `dir` and wire the search service.
pub fn build_search(app: &AppConfig, dir: &std::path::Path) -> Result<GlobalSearch> {
    let stores = jobhub_store::load_dir(dir)?;
    let search = GlobalSearch::from_config(&app.search, stores).context("building category registry")?;
    info!(categories = search.registry().len(), data_dir = %dir.display(), "search service ready");
    Ok(search)
}
