//! Static description of how each category is searched.
//!
//! Built once at startup from the configured [`CategorySpec`] table. Every
//! field name is resolved against the category schema here, so an unknown
//! field is a startup error rather than a silent miss at query time.

use std::collections::HashSet;
use std::sync::Arc;

use jobhub_core::config::CategorySpec;
use jobhub_core::{Category, Error, FieldPath, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedField {
    pub field: FieldPath,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct CategoryConfig {
    pub category: Category,
    pub searchable: Vec<FieldPath>,
    pub weights: Vec<WeightedField>,
    pub excluded: Vec<FieldPath>,
}

impl CategoryConfig {
    pub fn from_spec(spec: &CategorySpec) -> Result<Self> {
        let category = spec.name;
        if spec.searchable.is_empty() {
            return Err(Error::InvalidConfig(format!("category {category} has no searchable fields")));
        }
        let searchable = resolve_fields(category, &spec.searchable)?;
        let excluded = resolve_fields(category, &spec.excluded)?;
        let mut weights = Vec::with_capacity(spec.weights.len());
        for w in &spec.weights {
            if !(w.weight.is_finite() && w.weight > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "weight for {category}.{} must be a positive number, got {}",
                    w.field, w.weight
                )));
            }
            weights.push(WeightedField { field: category.field(&w.field)?, weight: w.weight });
        }
        Ok(Self { category, searchable, weights, excluded })
    }
}

fn resolve_fields(category: Category, names: &[String]) -> Result<Vec<FieldPath>> {
    names.iter().map(|name| category.field(name)).collect()
}

/// Immutable lookup table from category to its search configuration.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    configs: Vec<Arc<CategoryConfig>>,
}

impl Registry {
    /// Categories keep the order in which they are configured.
    pub fn from_specs(specs: &[CategorySpec]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut configs = Vec::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.name) {
                return Err(Error::InvalidConfig(format!("category '{}' is configured twice", spec.name)));
            }
            configs.push(Arc::new(CategoryConfig::from_spec(spec)?));
        }
        Ok(Self { configs })
    }

    pub fn get(&self, category: Category) -> Option<&Arc<CategoryConfig>> {
        self.configs.iter().find(|c| c.category == category)
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.configs.iter().map(|c| c.category)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Categories named in a comma-separated list, in registration order.
    ///
    /// Unknown or unregistered names are dropped without error. A missing or
    /// blank list selects every registered category.
    pub fn select(&self, requested: Option<&str>) -> Vec<Category> {
        let Some(raw) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
            return self.categories().collect();
        };
        let wanted: HashSet<Category> = raw
            .split(',')
            .filter_map(|name| name.trim().parse::<Category>().ok())
            .collect();
        self.categories().filter(|c| wanted.contains(c)).collect()
    }
}
