//! # Catalog Types
//!
//! Products and categories as persisted in the relational store. Rows map
//! directly via `sqlx::FromRow`; money fields are integer cents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::money::Price;

/// What kind of product a catalog entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ProductKind {
    /// Booster box
    Box,
    /// Single card
    Single,
    /// Sealed product
    Sealed,
}

impl Default for ProductKind {
    fn default() -> Self {
        ProductKind::Single
    }
}

impl ProductKind {
    /// Stable identifier used in storage and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Box => "box",
            ProductKind::Single => "single",
            ProductKind::Sealed => "sealed",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Box => "Booster Box",
            ProductKind::Single => "Single Card",
            ProductKind::Sealed => "Sealed Product",
        }
    }
}

/// A product category
///
/// Products reference zero-or-one category; deleting a category nulls the
/// reference on its products.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Unique, derived from `name` when not given explicitly
    pub slug: String,
}

/// A product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,

    /// Owning category, if any
    pub category_id: Option<i64>,

    /// Display name
    pub name: String,

    /// Unique URL slug, deduplicated with a numeric suffix on collision
    pub slug: String,

    /// Short description
    pub description: String,

    /// Unit price in cents
    pub price_cents: i64,

    /// Display currency label (e.g. `"$"`)
    pub currency: String,

    /// Image reference (path or URL)
    pub image: String,

    /// Whether this is a preorder listing
    pub is_preorder: bool,

    /// Product kind
    pub product_type: ProductKind,

    /// Whether this product is visible and purchasable
    pub available: bool,

    /// Units on hand. Non-negative by convention: checkout only decrements
    /// when the recorded stock covers the requested quantity.
    pub stock: i64,

    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Product {
    /// Unit price
    pub fn price(&self) -> Price {
        Price::from_cents(self.price_cents)
    }

    /// Price formatted with this product's currency label
    pub fn display_price(&self) -> String {
        self.price().display(&self.currency)
    }
}

/// Data for inserting a product; the slug is derived at insert time
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub currency: String,
    pub image: String,
    pub is_preorder: bool,
    pub product_type: ProductKind,
    pub available: bool,
    pub stock: i64,
    pub category_id: Option<i64>,
}

impl NewProduct {
    /// Create a new product with the catalog defaults
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            price,
            currency: "$".to_string(),
            image: String::new(),
            is_preorder: false,
            product_type: ProductKind::Single,
            available: true,
            stock: 0,
            category_id: None,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set product kind
    pub fn with_kind(mut self, kind: ProductKind) -> Self {
        self.product_type = kind;
        self
    }

    /// Builder: set stock on hand
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Builder: set owning category
    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Builder: set image reference
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Builder: mark as preorder
    pub fn preorder(mut self) -> Self {
        self.is_preorder = true;
        self
    }

    /// Builder: hide from the storefront
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(ProductKind::Box.as_str(), "box");
        assert_eq!(ProductKind::Sealed.label(), "Sealed Product");
        assert_eq!(ProductKind::default(), ProductKind::Single);
    }

    #[test]
    fn test_new_product_builder() {
        let new = NewProduct::new("Charizard", Price::from_major(129.99))
            .with_description("Holo rare")
            .with_kind(ProductKind::Single)
            .with_stock(3);

        assert_eq!(new.name, "Charizard");
        assert_eq!(new.price.cents(), 12999);
        assert_eq!(new.stock, 3);
        assert!(new.available);
        assert!(!new.is_preorder);
        assert_eq!(new.currency, "$");
    }
}
