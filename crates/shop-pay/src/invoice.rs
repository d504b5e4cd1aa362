//! # NowPayments Invoices
//!
//! Implementation of the NowPayments hosted invoice API.
//! This is the only payment flow the storefront uses.

use crate::config::NowPaymentsConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shop_core::{HostedInvoice, InvoiceDraft, InvoiceGateway, ShopError, ShopResult};
use tracing::{debug, error, info, instrument};

/// NowPayments hosted-invoice gateway
///
/// Uses NowPayments' hosted payment page: the buyer is redirected to the
/// invoice URL and settles there, so no payment data touches this service.
pub struct NowPaymentsGateway {
    config: NowPaymentsConfig,
    client: Client,
}

impl NowPaymentsGateway {
    /// Create a new NowPayments gateway
    pub fn new(config: NowPaymentsConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> ShopResult<Self> {
        let config = NowPaymentsConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build the wire payload for an invoice draft
    fn build_request<'a>(&'a self, draft: &'a InvoiceDraft) -> InvoiceRequest<'a> {
        InvoiceRequest {
            price_amount: draft.total.as_major(),
            price_currency: &self.config.price_currency,
            pay_currency: &self.config.pay_currency,
            order_id: &draft.order_id,
            order_description: &draft.description,
            ipn_callback_url: &draft.ipn_callback_url,
            success_url: &draft.success_url,
            cancel_url: &draft.cancel_url,
        }
    }
}

#[async_trait]
impl InvoiceGateway for NowPaymentsGateway {
    #[instrument(skip(self, draft), fields(order_id = %draft.order_id))]
    async fn create_invoice(&self, draft: &InvoiceDraft) -> ShopResult<HostedInvoice> {
        if draft.total.cents() <= 0 {
            return Err(ShopError::InvalidRequest(
                "Invoice total must be positive".to_string(),
            ));
        }

        let payload = self.build_request(draft);

        debug!(
            "Creating NowPayments invoice: amount={} {}, pay_currency={}",
            payload.price_amount, payload.price_currency, payload.pay_currency
        );

        let url = format!("{}/v1/invoice", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ShopError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("NowPayments API error: status={}, body={}", status, body);

            // Parse NowPayments error
            if let Ok(error_response) = serde_json::from_str::<NowPaymentsErrorResponse>(&body) {
                return Err(ShopError::Provider {
                    provider: "nowpayments".to_string(),
                    message: error_response.message,
                });
            }

            return Err(ShopError::Provider {
                provider: "nowpayments".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let invoice_response: InvoiceResponse = serde_json::from_str(&body).map_err(|e| {
            ShopError::Serialization(format!("Failed to parse NowPayments response: {}", e))
        })?;

        info!(
            "Created NowPayments invoice: order_id={}, url={}",
            draft.order_id, invoice_response.invoice_url
        );

        Ok(HostedInvoice {
            invoice_id: invoice_response.id.map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            }),
            invoice_url: invoice_response.invoice_url,
        })
    }

    fn provider_name(&self) -> &'static str {
        "nowpayments"
    }
}

// =============================================================================
// NowPayments API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct InvoiceRequest<'a> {
    price_amount: f64,
    price_currency: &'a str,
    pay_currency: &'a str,
    order_id: &'a str,
    order_description: &'a str,
    ipn_callback_url: &'a str,
    success_url: &'a str,
    cancel_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct InvoiceResponse {
    /// The API returns the invoice id as a string or a number
    #[serde(default)]
    id: Option<serde_json::Value>,
    invoice_url: String,
}

#[derive(Debug, Deserialize)]
struct NowPaymentsErrorResponse {
    message: String,
}
