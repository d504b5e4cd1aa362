//! # shop-core
//!
//! Core types and traits for the cardstore storefront engine.
//!
//! This crate provides:
//! - `Price` for integer-cent money handling
//! - `Product`, `Category`, and `ProductKind` for the catalog
//! - `Cart` and `CartLine` for the session-backed shopping cart
//! - `Order`, `OrderItem`, and `CheckoutDetails` for the order ledger
//! - `InvoiceGateway` trait for hosted-invoice payment providers
//! - `SeedCatalog` for bootstrapping the catalog from `config/products.toml`
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{Cart, Price};
//!
//! // Build a cart and accumulate quantities
//! let mut cart = Cart::default();
//! cart.add(1, Price::from_major(10.0), 2);
//! cart.add(1, Price::from_major(10.0), 3);
//!
//! assert_eq!(cart.item_count(), 5);
//! assert_eq!(cart.total().cents(), 5000);
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod gateway;
pub mod money;
pub mod order;
pub mod product;
pub mod slug;

// Re-exports for convenience
pub use cart::{Cart, CartLine};
pub use catalog::{SeedCatalog, SeedCategory, SeedProduct};
pub use error::{ShopError, ShopResult};
pub use gateway::{BoxedInvoiceGateway, CallbackUrls, HostedInvoice, InvoiceDraft, InvoiceGateway};
pub use money::Price;
pub use order::{BitcoinPayment, CheckoutDetails, Order, OrderItem};
pub use product::{Category, NewProduct, Product, ProductKind};
pub use slug::slugify;
