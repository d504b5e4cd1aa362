//! # Session Plumbing
//!
//! SQLite-backed sessions via tower-sessions; the cart lives in the session
//! under a single key. Handlers go through the accessors here rather than
//! touching session keys directly, so every mutation is written back and the
//! cart's storage shape stays in one place.

use sqlx::SqlitePool;
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use shop_core::Cart;

/// Session cookie name
pub const SESSION_COOKIE_NAME: &str = "cardstore_session";

/// Session expiry time in seconds (7 days)
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session key holding the serialized cart
const CART_KEY: &str = "cart";

/// Create the session layer with a SQLite store.
///
/// Runs the store's own migration so the sessions table exists before the
/// first request.
pub async fn create_session_layer(
    pool: &SqlitePool,
    base_url: &str,
) -> Result<SessionManagerLayer<SqliteStore>, sqlx::Error> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;

    let is_secure = base_url.starts_with("https://");

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/"))
}

/// Read the cart from the session; a missing or unreadable cart is empty
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(CART_KEY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back into the session
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(CART_KEY, cart).await
}

/// Replace the cart with an empty one
pub async fn clear_cart(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(CART_KEY, Cart::default()).await
}

/// The session's key, used to label provider-side order ids
pub fn session_key(session: &Session) -> String {
    session
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "anonymous".to_string())
}
