//! # Request Handlers
//!
//! Axum request handlers for the storefront: catalog browsing, the
//! session-backed cart, checkout, and the hosted-invoice payment redirect.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{error, info, instrument};

use crate::db::{CategoryStore, ListFilter, OrderStore, ProductStore};
use crate::error::{AppError, Result};
use crate::mail::{notification_body, notification_subject, OrderLine};
use crate::session;
use crate::state::AppState;
use shop_core::{Cart, Category, CheckoutDetails, InvoiceDraft, Product};

// =============================================================================
// Request Types
// =============================================================================

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    /// Name-substring search
    pub q: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
}

/// Add to cart form data
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub quantity: Option<u32>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cardstore",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Storefront home: newest available products plus all categories
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<serde_json::Value>> {
    let featured = ProductStore::new(&state.pool).featured(6).await?;
    let categories = CategoryStore::new(&state.pool).all().await?;

    Ok(Json(serde_json::json!({
        "featured": featured,
        "categories": categories,
    })))
}

/// Paginated product listing with optional name search
#[instrument(skip(state))]
pub async fn product_list(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<serde_json::Value>> {
    render_listing(&state, None, query).await
}

/// Product listing restricted to one category
#[instrument(skip(state))]
pub async fn product_list_by_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<serde_json::Value>> {
    let category = CategoryStore::new(&state.pool)
        .by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {}", slug)))?;

    render_listing(&state, Some(category), query).await
}

async fn render_listing(
    state: &AppState,
    category: Option<Category>,
    query: ListingQuery,
) -> Result<Json<serde_json::Value>> {
    let filter = ListFilter {
        category_id: category.as_ref().map(|c| c.id),
        query: query.q.clone().filter(|q| !q.is_empty()),
    };

    let page = ProductStore::new(&state.pool)
        .list(&filter, query.page.unwrap_or(1))
        .await?;
    let categories = CategoryStore::new(&state.pool).all().await?;

    Ok(Json(serde_json::json!({
        "category": category,
        "categories": categories,
        "products": page.products,
        "page": page.page,
        "total_pages": page.total_pages,
        "count": page.total,
        "query": query.q,
    })))
}

/// Product detail; unknown or unavailable slugs are a 404
#[instrument(skip(state))]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    let product = ProductStore::new(&state.pool)
        .available_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", slug)))?;

    Ok(Json(product))
}

// =============================================================================
// Cart
// =============================================================================

/// Cart contents with live product data resolved per line
#[instrument(skip(state, session))]
pub async fn cart_detail(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<serde_json::Value>> {
    let cart = session::load_cart(&session).await;
    let summary = cart_summary(&state, &cart).await?;
    Ok(Json(summary))
}

/// Add one unit to the cart (GET form of the add route)
#[instrument(skip(state, session))]
pub async fn cart_add(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i64>,
) -> Result<Redirect> {
    add_to_cart(&state, &session, product_id, 1).await
}

/// Add to the cart with an explicit quantity
#[instrument(skip(state, session, form))]
pub async fn cart_add_with_quantity(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i64>,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    add_to_cart(&state, &session, product_id, form.quantity.unwrap_or(1)).await
}

async fn add_to_cart(
    state: &AppState,
    session: &Session,
    product_id: i64,
    quantity: u32,
) -> Result<Redirect> {
    let product = ProductStore::new(&state.pool)
        .by_id(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", product_id)))?;

    let mut cart = session::load_cart(session).await;
    cart.add(product.id, product.price(), quantity);
    session::save_cart(session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Remove a product from the cart; removing one that is not in the cart is
/// a no-op, but the product itself must exist
#[instrument(skip(state, session))]
pub async fn cart_remove(
    State(state): State<AppState>,
    session: Session,
    Path(product_id): Path<i64>,
) -> Result<Redirect> {
    let product = ProductStore::new(&state.pool)
        .by_id(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", product_id)))?;

    let mut cart = session::load_cart(&session).await;
    cart.remove(product.id);
    session::save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Resolve cart lines against the live catalog.
///
/// Lines whose product has vanished from the catalog are skipped rather
/// than rendered stale.
async fn cart_summary(state: &AppState, cart: &Cart) -> Result<serde_json::Value> {
    let products = ProductStore::new(&state.pool);

    let mut items = Vec::with_capacity(cart.lines().len());
    for line in cart.lines() {
        let Some(product) = products.by_id(line.product_id).await? else {
            continue;
        };

        let unit_price = line.price().display(&product.currency);
        items.push(serde_json::json!({
            "product": product,
            "quantity": line.quantity,
            "unit_price_cents": line.price_cents,
            "unit_price": unit_price,
            "subtotal_cents": line.subtotal().cents(),
        }));
    }

    Ok(serde_json::json!({
        "items": items,
        "item_count": cart.item_count(),
        "total_cents": cart.total().cents(),
        "total": cart.total().display("$"),
    }))
}

// =============================================================================
// Checkout
// =============================================================================

/// Checkout page data; an empty cart bounces back to the listing
#[instrument(skip(state, session))]
pub async fn checkout_form(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response> {
    let cart = session::load_cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/shop").into_response());
    }

    let summary = cart_summary(&state, &cart).await?;
    Ok(Json(summary).into_response())
}

/// Create an order from the cart.
///
/// Order, items, and stock decrements commit in a single transaction. The
/// notification mail goes to the store's own mailbox afterwards; a mail
/// transport failure fails the request (and leaves the cart intact), but
/// the committed order stays.
#[instrument(skip(state, session, form))]
pub async fn checkout_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutDetails>,
) -> Result<Response> {
    let cart = session::load_cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/shop").into_response());
    }

    let (order, items) = OrderStore::new(&state.pool).create(&form, &cart).await?;

    info!("Created order #{} with {} items", order.id, items.len());

    let products = ProductStore::new(&state.pool);
    let mut lines = Vec::with_capacity(items.len());
    for item in &items {
        let (name, currency) = match products.by_id(item.product_id).await? {
            Some(product) => (product.name, product.currency),
            None => (format!("product {}", item.product_id), "$".to_string()),
        };
        lines.push(OrderLine {
            name,
            quantity: item.quantity,
            unit_price: item.price().display(&currency),
        });
    }

    state
        .mailer
        .send(
            &notification_subject(&order),
            &notification_body(&order, &lines),
        )
        .await?;

    session::clear_cart(&session).await?;

    // The confirmation page does not echo the buyer's email back
    Ok(Html(CHECKOUT_COMPLETE_HTML).into_response())
}

// =============================================================================
// Payment
// =============================================================================

/// Redirect the buyer to a hosted invoice for the cart total.
///
/// A gateway failure is reported as a plain-text page carrying the error;
/// on success the browser is sent to the provider-hosted invoice URL.
#[instrument(skip(state, session))]
pub async fn bitcoin_payment(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response> {
    let cart = session::load_cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let urls = state.callback_urls();
    let draft = InvoiceDraft {
        total: cart.total(),
        order_id: format!("order_{}", session::session_key(&session)),
        description: "Cardstore Order".to_string(),
        success_url: urls.success_url(),
        cancel_url: urls.cancel_url(),
        ipn_callback_url: urls.success_url(),
    };

    match state.gateway.create_invoice(&draft).await {
        Ok(invoice) => Ok(Redirect::to(&invoice.invoice_url).into_response()),
        Err(e) => {
            error!("Failed to create hosted invoice: {}", e);
            Ok((
                StatusCode::BAD_GATEWAY,
                format!(
                    "Error contacting {}: {}",
                    state.gateway.provider_name(),
                    e
                ),
            )
                .into_response())
        }
    }
}

/// Payment landing page.
///
/// No confirmation from the provider is checked here: any visit empties the
/// session cart.
#[instrument(skip(session))]
pub async fn payment_success(session: Session) -> Result<Html<&'static str>> {
    session::clear_cart(&session).await?;
    Ok(Html(PAYMENT_SUCCESS_HTML))
}

const CHECKOUT_COMPLETE_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Order Placed</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
    <div style="padding: 60px; border-radius: 16px; text-align: center; border: 1px solid #ddd;">
        <h1>Thank you for your order!</h1>
        <p style="color: #666;">We received it and will be in touch shortly.</p>
        <p><a href="/shop">Back to the shop</a></p>
    </div>
</body>
</html>
"#;

const PAYMENT_SUCCESS_HTML: &str = r#"
<!DOCTYPE html>
<html>
<head><title>Payment Received</title></head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
    <div style="padding: 60px; border-radius: 16px; text-align: center; border: 1px solid #ddd;">
        <h1>Payment received</h1>
        <p style="color: #666;">Your cart has been cleared. Thank you!</p>
        <p><a href="/shop">Back to the shop</a></p>
    </div>
</body>
</html>
"#;
