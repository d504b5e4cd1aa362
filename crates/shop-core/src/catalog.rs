//! # Seed Catalog
//!
//! Catalog bootstrap loaded from `config/products.toml`. Used at startup to
//! populate an empty catalog table; the admin surface owns the catalog after
//! that.

use serde::{Deserialize, Serialize};

use crate::product::ProductKind;

/// A category in the seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedCategory {
    pub name: String,
}

/// A product in the seed file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedProduct {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Unit price in major units (e.g. `129.99`)
    pub price: f64,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub preorder: bool,

    #[serde(default)]
    pub kind: ProductKind,

    #[serde(default = "default_true")]
    pub available: bool,

    #[serde(default)]
    pub stock: i64,

    /// Name of the owning category, matched against `[[categories]]`
    #[serde(default)]
    pub category: Option<String>,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_true() -> bool {
    true
}

/// Seed catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub categories: Vec<SeedCategory>,

    #[serde(default)]
    pub products: Vec<SeedProduct>,
}

impl SeedCatalog {
    /// Load a seed catalog from TOML
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
