//! # NowPayments Configuration
//!
//! Configuration management for the NowPayments integration.
//! The API key is loaded from environment variables.

use shop_core::ShopError;
use std::env;

/// NowPayments API configuration
#[derive(Debug, Clone)]
pub struct NowPaymentsConfig {
    /// API key (sent as the `x-api-key` header)
    pub api_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Currency the invoice total is denominated in
    pub price_currency: String,

    /// Currency the buyer settles in
    pub pay_currency: String,
}

impl NowPaymentsConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `NOWPAYMENTS_API_KEY`
    ///
    /// Optional:
    /// - `NOWPAYMENTS_PAY_CURRENCY` (default: `btc`)
    pub fn from_env() -> Result<Self, ShopError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var("NOWPAYMENTS_API_KEY").map_err(|_| {
            ShopError::Configuration("NOWPAYMENTS_API_KEY not set".to_string())
        })?;

        if api_key.trim().is_empty() {
            return Err(ShopError::Configuration(
                "NOWPAYMENTS_API_KEY is empty".to_string(),
            ));
        }

        let pay_currency =
            env::var("NOWPAYMENTS_PAY_CURRENCY").unwrap_or_else(|_| "btc".to_string());

        Ok(Self {
            api_key,
            api_base_url: "https://api.nowpayments.io".to_string(),
            price_currency: "usd".to_string(),
            pay_currency,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base_url: "https://api.nowpayments.io".to_string(),
            price_currency: "usd".to_string(),
            pay_currency: "btc".to_string(),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set the settlement currency
    pub fn with_pay_currency(mut self, currency: impl Into<String>) -> Self {
        self.pay_currency = currency.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config() {
        let config = NowPaymentsConfig::new("test-key").with_pay_currency("ltc");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.api_base_url, "https://api.nowpayments.io");
        assert_eq!(config.price_currency, "usd");
        assert_eq!(config.pay_currency, "ltc");
    }

    #[test]
    fn test_base_url_override() {
        let config = NowPaymentsConfig::new("test-key").with_api_base_url("http://127.0.0.1:9000");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
    }
}
