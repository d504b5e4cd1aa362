//! # Application State
//!
//! Shared state for the Axum application: connection pool, mail transport,
//! invoice gateway, and configuration. The mailer and gateway are trait
//! objects so tests can substitute them.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db;
use crate::mail::{Mailer, SmtpMailer};
use shop_core::{BoxedInvoiceGateway, CallbackUrls, SeedCatalog};
use shop_pay::NowPaymentsGateway;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Order notification transport
    pub mailer: Arc<dyn Mailer>,
    /// Hosted-invoice payment gateway
    pub gateway: BoxedInvoiceGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Assemble state from already-built parts
    pub fn new(
        config: AppConfig,
        pool: SqlitePool,
        mailer: Arc<dyn Mailer>,
        gateway: BoxedInvoiceGateway,
    ) -> Self {
        Self {
            pool,
            mailer,
            gateway,
            config,
        }
    }

    /// Build the full production state from the environment: config, pool,
    /// schema, seed catalog, SMTP mailer, and the NowPayments gateway.
    pub async fn from_env() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;

        let pool = db::connect(&config.database_url).await?;
        db::init_schema(&pool).await?;

        let seeded = db::seed_if_empty(&pool, &load_seed_catalog()?).await?;
        if seeded > 0 {
            tracing::info!("Seeded {} products into the empty catalog", seeded);
        }

        let mailer = SmtpMailer::new(&config.mail)
            .map_err(|e| anyhow::anyhow!("Failed to initialize SMTP mailer: {}", e))?;

        let gateway = NowPaymentsGateway::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize NowPayments: {}", e))?;

        Ok(Self::new(
            config,
            pool,
            Arc::new(mailer),
            Arc::new(gateway),
        ))
    }

    /// Callback URLs derived from the configured base URL
    pub fn callback_urls(&self) -> CallbackUrls {
        CallbackUrls::new(&self.config.base_url)
    }
}

/// Load the seed catalog from the config file
fn load_seed_catalog() -> anyhow::Result<SeedCatalog> {
    let config_paths = [
        "config/products.toml",
        "../config/products.toml",
        "../../config/products.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let catalog = SeedCatalog::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!(
                "Loaded {} seed products from {}",
                catalog.products.len(),
                path
            );
            return Ok(catalog);
        }
    }

    // No seed file is fine; the catalog is admin-managed after bootstrap
    tracing::warn!("No seed catalog found, starting with an empty catalog");
    Ok(SeedCatalog::default())
}
