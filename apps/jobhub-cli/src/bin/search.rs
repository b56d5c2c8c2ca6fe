//! jobhub-search: run one query against the data directory and print the
//! response envelope as JSON.
//!
//! ```bash
//! jobhub-search developer --categories jobs,users --limit 5
//! jobhub-search "full stack" --combined --sort date
//! ```
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use jobhub_cli::{build_search, data_dir, init_tracing, load_config};
use jobhub_search::{ApiResponse, SearchRequest};

#[derive(Parser)]
#[command(name = "jobhub-search", version, about = "One-shot federated search")]
struct Cli {
    /// Search text
    query: String,

    /// Comma-separated category names (all when omitted)
    #[arg(long)]
    categories: Option<String>,

    /// Results per category
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// 1-based page number
    #[arg(long)]
    page: Option<usize>,

    /// `relevance` or `date`
    #[arg(long)]
    sort: Option<String>,

    /// Merge all categories into one list
    #[arg(long)]
    combined: bool,

    /// Cut the merged list to one page
    #[arg(long)]
    combined_pagination: bool,

    /// Configuration environment; defaults to `RUST_ENV`
    #[arg(long, env = "RUST_ENV")]
    config_env: Option<String>,

    /// Directory of `<category>.json` files, overrides `data.dir`
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl Cli {
    fn request(&self) -> SearchRequest {
        let mut request = SearchRequest::new(self.query.clone());
        request.categories = self.categories.clone();
        request.limit = self.limit.map(|n| n.to_string());
        request.page = self.page.map(|n| n.to_string());
        request.sort = self.sort.clone();
        request.combined = self.combined.then(|| "true".to_string());
        request.combined_pagination = self.combined_pagination.then(|| "true".to_string());
        request
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the JSON, keep logs quiet unless asked for.
    init_tracing("warn");
    let cli = Cli::parse();

    let app = load_config(cli.config_env.as_deref())?;
    let dir = data_dir(&app, cli.data_dir.clone())?;
    let search = build_search(&app, &dir)?;

    let outcome = search.global_search(&cli.request()).await;
    let failed = outcome.is_err();
    let envelope = ApiResponse::from_search(outcome);
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    if failed {
        std::process::exit(1);
    }
    Ok(())
}
