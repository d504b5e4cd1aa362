//! # Routes
//!
//! Axum router configuration for the storefront.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::SqliteStore;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router
///
/// Routes:
/// - Catalog:
///   - GET `/` - featured products and categories
///   - GET `/shop` - paginated listing (`q`, `page`)
///   - GET `/shop/category/{slug}` - listing filtered by category
///   - GET `/product/{slug}` - product detail
///
/// - Cart:
///   - GET  `/cart` - cart contents
///   - GET/POST `/cart/add/{product_id}` - add (POST carries `quantity`)
///   - GET  `/cart/remove/{product_id}` - remove
///
/// - Checkout & payment:
///   - GET/POST `/checkout` - form data / create order
///   - GET `/pay/bitcoin` - redirect to the hosted invoice
///   - GET `/payment-success` - landing page, empties the cart
pub fn create_router(
    state: AppState,
    session_layer: SessionManagerLayer<SqliteStore>,
) -> Router {
    let cart_routes = Router::new()
        .route("/", get(handlers::cart_detail))
        .route(
            "/add/{product_id}",
            get(handlers::cart_add).post(handlers::cart_add_with_quantity),
        )
        .route("/remove/{product_id}", get(handlers::cart_remove));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        // Catalog
        .route("/", get(handlers::home))
        .route("/shop", get(handlers::product_list))
        .route("/shop/category/{slug}", get(handlers::product_list_by_category))
        .route("/product/{slug}", get(handlers::product_detail))
        // Cart
        .nest("/cart", cart_routes)
        // Checkout & payment
        .route(
            "/checkout",
            get(handlers::checkout_form).post(handlers::checkout_submit),
        )
        .route("/pay/bitcoin", get(handlers::bitcoin_payment))
        .route("/payment-success", get(handlers::payment_success))
        // Middleware
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
