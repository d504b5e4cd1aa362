//! # Order Ledger Types
//!
//! Durable records created at checkout. Order items snapshot the cart price
//! at order-creation time, so historical orders are immune to later catalog
//! price changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::money::Price;

/// Buyer details submitted with the checkout form
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutDetails {
    pub full_name: String,
    pub email: String,
    pub address: String,
}

/// A completed checkout
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub address: String,

    /// Cart total in cents at order-creation time
    pub total_cents: i64,

    /// Payment confirmation flag. No code path currently sets this; the
    /// external provider's confirmation is not reconciled with local state.
    pub paid: bool,

    pub created: DateTime<Utc>,
}

impl Order {
    /// Order total
    pub fn total(&self) -> Price {
        Price::from_cents(self.total_cents)
    }
}

/// One line of an order, snapshotted from the cart
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: i64,

    /// Owning order; items are deleted with it
    pub order_id: i64,

    /// Referenced product; deleting a referenced product is blocked
    pub product_id: i64,

    /// Unit price in cents, copied from the cart line (not the live product)
    pub price_cents: i64,

    pub quantity: i64,
}

impl OrderItem {
    /// Snapshotted unit price
    pub fn price(&self) -> Price {
        Price::from_cents(self.price_cents)
    }

    /// Line subtotal
    pub fn subtotal(&self) -> Price {
        Price::from_cents(self.price_cents * self.quantity)
    }
}

/// External payment confirmation record.
///
/// A placeholder for reconciling the invoice provider's charge state with the
/// local ledger; the live flow never writes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BitcoinPayment {
    pub id: i64,
    pub order_id: String,
    pub charge_id: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub created: DateTime<Utc>,
}
