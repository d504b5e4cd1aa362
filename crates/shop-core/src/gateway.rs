//! # Invoice Gateway Trait
//!
//! Seam for hosted-invoice payment providers. The storefront computes a cart
//! total, asks the gateway for a hosted invoice, and redirects the buyer to
//! the returned URL; the wire format and currency choices live with the
//! provider implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ShopResult;
use crate::money::Price;

/// What the storefront asks the provider to collect
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    /// Total to collect
    pub total: Price,

    /// Storefront-side order identifier
    pub order_id: String,

    /// Free-text description shown on the hosted invoice
    pub description: String,

    /// Where the provider sends the buyer after payment
    pub success_url: String,

    /// Where the provider sends the buyer on cancel
    pub cancel_url: String,

    /// Provider-to-store notification callback
    pub ipn_callback_url: String,
}

/// A hosted invoice created by the provider
#[derive(Debug, Clone)]
pub struct HostedInvoice {
    /// Provider-side invoice id, when the provider returns one
    pub invoice_id: Option<String>,

    /// Hosted payment page to redirect the buyer to
    pub invoice_url: String,
}

/// Callback URLs pointing back at this storefront
#[derive(Debug, Clone)]
pub struct CallbackUrls {
    base_url: String,
}

impl CallbackUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Success/IPN landing page
    pub fn success_url(&self) -> String {
        format!("{}/payment-success", self.base_url)
    }

    /// Where a cancelled payment returns the buyer
    pub fn cancel_url(&self) -> String {
        format!("{}/cart", self.base_url)
    }
}

/// Trait for hosted-invoice payment providers.
///
/// Each provider implements this trait, allowing the storefront to switch
/// providers without touching handler code.
#[async_trait]
pub trait InvoiceGateway: Send + Sync {
    /// Create a hosted invoice and return its redirect URL.
    async fn create_invoice(&self, draft: &InvoiceDraft) -> ShopResult<HostedInvoice>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed gateway (dynamic dispatch)
pub type BoxedInvoiceGateway = Arc<dyn InvoiceGateway>;
