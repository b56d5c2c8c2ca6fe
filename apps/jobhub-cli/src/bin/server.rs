//! jobhub-server: serves the search API over HTTP.
//!
//! ```bash
//! jobhub-server --config-env prod
//! jobhub-server --bind 0.0.0.0:9000 --data-dir ./data
//! ```
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use jobhub_cli::{build_search, data_dir, init_tracing, load_config};
use jobhub_http::{build_router, AppState};

#[derive(Parser)]
#[command(name = "jobhub-server", version, about = "Federated job-marketplace search API")]
struct Cli {
    /// Configuration environment (`dev`, `prod`, `test`); defaults to `RUST_ENV`
    #[arg(long, env = "RUST_ENV")]
    config_env: Option<String>,

    /// Listen address, overrides `server.host` and `server.port`
    #[arg(long)]
    bind: Option<String>,

    /// Directory of `<category>.json` files, overrides `data.dir`
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info,tower_http=debug");
    let cli = Cli::parse();

    let app = load_config(cli.config_env.as_deref())?;
    let dir = data_dir(&app, cli.data_dir)?;
    let search = build_search(&app, &dir)?;

    let addr = cli.bind.unwrap_or_else(|| app.bind_addr());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, build_router(Arc::new(AppState::new(search))))
        .await
        .context("HTTP server stopped")?;
    Ok(())
}
