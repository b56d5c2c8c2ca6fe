//! Layered configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` separates nested keys, e.g. `APP_SERVER__PORT`).
//! The per-category field and weight tables are part of the configuration and
//! are read once at startup.
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Category;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding one `<category>.json` or `<category>.jsonl` file per category.
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    pub min_query_len: usize,
    pub categories: Vec<CategorySpec>,
}

/// How one category is searched: which fields are matched, how they weigh
/// in the relevance score, and which fields never leave the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpec {
    pub name: Category,
    pub searchable: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
    pub weights: Vec<FieldWeight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldWeight {
    pub field: String,
    pub weight: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { dir: "data".to_string() }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_limit: 10, max_limit: 100, min_query_len: 2, categories: default_categories() }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

fn spec(name: Category, searchable: &[&str], excluded: &[&str], weights: &[(&str, f64)]) -> CategorySpec {
    CategorySpec {
        name,
        searchable: searchable.iter().map(|s| (*s).to_string()).collect(),
        excluded: excluded.iter().map(|s| (*s).to_string()).collect(),
        weights: weights
            .iter()
            .map(|(field, weight)| FieldWeight { field: (*field).to_string(), weight: *weight })
            .collect(),
    }
}

/// The stock category table used when no configuration file overrides it.
pub fn default_categories() -> Vec<CategorySpec> {
    vec![
        spec(
            Category::Users,
            &["fullName", "username", "jobTitle", "bio", "skills", "location", "address.city", "address.country"],
            &["password", "otp", "resetPasswordToken", "email", "phone", "__v"],
            &[("fullName", 3.0), ("username", 2.5), ("jobTitle", 2.0), ("skills", 1.5), ("bio", 1.0), ("location", 0.8)],
        ),
        spec(
            Category::Jobs,
            &["title", "description", "companyName", "location", "skills", "jobType", "category"],
            &["applicants", "__v"],
            &[("title", 3.0), ("skills", 2.0), ("companyName", 1.5), ("category", 1.2), ("description", 1.0), ("location", 0.8)],
        ),
        spec(
            Category::QuickJobs,
            &["title", "description", "location", "category", "skills"],
            &["__v"],
            &[("title", 3.0), ("category", 1.5), ("skills", 1.5), ("description", 1.0), ("location", 0.8)],
        ),
        spec(
            Category::BusinessServices,
            &["serviceName", "description", "category", "tags", "location", "provider.name"],
            &["provider.email", "__v"],
            &[("serviceName", 3.0), ("category", 2.0), ("tags", 1.5), ("provider.name", 1.2), ("description", 1.0), ("location", 0.8)],
        ),
        spec(
            Category::Discover,
            &["title", "description", "content", "category", "tags"],
            &["__v"],
            &[("title", 3.0), ("tags", 1.5), ("category", 1.5), ("description", 1.0), ("content", 0.5)],
        ),
        spec(
            Category::Articles,
            &["title", "summary", "content", "author", "tags"],
            &["__v"],
            &[("title", 3.0), ("tags", 1.5), ("summary", 1.2), ("author", 1.0), ("content", 0.5)],
        ),
    ]
}

impl AppConfig {
    /// Sanity checks that do not need the category schemas.
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if search.default_limit == 0 || search.max_limit == 0 {
            return Err(Error::InvalidConfig("search limits must be positive".to_string()));
        }
        if search.default_limit > search.max_limit {
            return Err(Error::InvalidConfig(format!(
                "search.default_limit ({}) exceeds search.max_limit ({})",
                search.default_limit, search.max_limit
            )));
        }
        if search.min_query_len == 0 {
            return Err(Error::InvalidConfig("search.min_query_len must be at least 1".to_string()));
        }
        let mut seen = HashSet::new();
        for spec in &search.categories {
            if !seen.insert(spec.name) {
                return Err(Error::InvalidConfig(format!("category '{}' is configured twice", spec.name)));
            }
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

pub struct Config {
    figment: Figment,
    env_name: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));
        Ok(Self { figment, env_name: env_name.to_string() })
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// The fully merged, validated application configuration.
    pub fn app(&self) -> Result<AppConfig> {
        let app: AppConfig = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        app.validate()?;
        Ok(app)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
