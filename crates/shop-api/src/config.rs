//! # Application Configuration
//!
//! Storefront configuration loaded from environment variables.
//!
//! ## Required
//! - `SMTP_HOST` - SMTP relay for order notifications
//! - `SMTP_USERNAME` / `SMTP_PASSWORD` - SMTP credentials
//! - `NOWPAYMENTS_API_KEY` - consumed by `shop-pay` (see its config)
//!
//! ## Optional
//! - `HOST` - bind address (default: 127.0.0.1)
//! - `PORT` - listen port (default: 8080)
//! - `BASE_URL` - public URL for payment callbacks (default: http://localhost:8080)
//! - `ENVIRONMENT` - development/staging/production (default: development)
//! - `DATABASE_URL` - SQLite database (default: sqlite:cardstore.db?mode=rwc)
//! - `SMTP_PORT` - default 587
//! - `MAIL_FROM` - sender address (default: SMTP_USERNAME)
//! - `MAIL_NOTIFY` - mailbox receiving order notifications (default: SMTP_USERNAME)

use shop_core::ShopError;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL for payment callbacks
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// SQLite database URL
    pub database_url: String,
    /// Order notification mail settings
    pub mail: MailConfig,
}

/// SMTP settings for the order notification mailbox
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Sender address on outgoing notifications
    pub from_address: String,
    /// The store's own mailbox; order notifications go here, not to buyers
    pub notify_address: String,
}

impl MailConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, ShopError> {
        let smtp_host = std::env::var("SMTP_HOST")
            .map_err(|_| ShopError::Configuration("SMTP_HOST not set".to_string()))?;
        let smtp_username = std::env::var("SMTP_USERNAME")
            .map_err(|_| ShopError::Configuration("SMTP_USERNAME not set".to_string()))?;
        let smtp_password = std::env::var("SMTP_PASSWORD")
            .map_err(|_| ShopError::Configuration("SMTP_PASSWORD not set".to_string()))?;

        let smtp_port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587);

        let from_address =
            std::env::var("MAIL_FROM").unwrap_or_else(|_| smtp_username.clone());
        let notify_address =
            std::env::var("MAIL_NOTIFY").unwrap_or_else(|_| smtp_username.clone());

        Ok(Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_address,
            notify_address,
        })
    }
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, ShopError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:cardstore.db?mode=rwc".to_string()),
            mail: MailConfig::from_env()?,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, ShopError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ShopError::Configuration(format!(
                    "Invalid socket address {}:{}",
                    self.host, self.port
                ))
            })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Config for tests: local bind, in-memory database, placeholder mail relay
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            base_url: "http://localhost:8080".to_string(),
            environment: "test".to_string(),
            database_url: "sqlite::memory:".to_string(),
            mail: MailConfig {
                smtp_host: "localhost".to_string(),
                smtp_port: 2525,
                smtp_username: "orders@cardstore.test".to_string(),
                smtp_password: "unused".to_string(),
                from_address: "orders@cardstore.test".to_string(),
                notify_address: "owner@cardstore.test".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let mut config = AppConfig::for_tests();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_environment_flag() {
        let mut config = AppConfig::for_tests();
        assert!(!config.is_production());

        config.environment = "production".to_string();
        assert!(config.is_production());
    }
}
