//! # Cardstore
//!
//! Session-backed card storefront with checkout and a hosted-invoice
//! payment redirect.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export NOWPAYMENTS_API_KEY=...
//! export SMTP_HOST=smtp.example.com
//! export SMTP_USERNAME=orders@example.com
//! export SMTP_PASSWORD=...
//!
//! # Run the server
//! cardstore
//! ```

use shop_api::{create_router, session, AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::from_env().await?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());

    // Session layer (runs its own store migration)
    let session_layer = session::create_session_layer(&state.pool, &state.config.base_url).await?;

    // Create router
    let app = create_router(state, session_layer);

    // Start server
    info!("Cardstore starting on http://{}", addr);

    if !is_prod {
        info!("Storefront: http://{}/shop", addr);
        info!("Cart: http://{}/cart", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
