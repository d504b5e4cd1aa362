//! # shop-api
//!
//! HTTP storefront for cardstore-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Catalog browsing, session-backed cart, and checkout
//! - Hosted-invoice payment redirect
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/` | Featured products and categories |
//! | GET | `/shop` | Product listing (`q`, `page`) |
//! | GET | `/shop/category/{slug}` | Listing filtered by category |
//! | GET | `/product/{slug}` | Product detail |
//! | GET | `/cart` | Cart contents |
//! | GET/POST | `/cart/add/{product_id}` | Add to cart (POST carries `quantity`) |
//! | GET | `/cart/remove/{product_id}` | Remove from cart |
//! | GET/POST | `/checkout` | Checkout form data / create order |
//! | GET | `/pay/bitcoin` | Redirect to the hosted invoice |
//! | GET | `/payment-success` | Payment landing page; empties the cart |

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod mail;
pub mod routes;
pub mod session;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
