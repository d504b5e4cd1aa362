//! # Payment Confirmation Records
//!
//! Storage for external payment confirmations. The live flow never writes
//! these rows; the table exists so provider notifications can be reconciled
//! with the ledger once that wiring lands.

use chrono::Utc;
use sqlx::SqlitePool;

use shop_core::{BitcoinPayment, Price};

/// Repository for bitcoin payment records
pub struct PaymentStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PaymentStore<'a> {
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a provider charge against a storefront order id
    pub async fn record(
        &self,
        order_id: &str,
        charge_id: &str,
        amount: Price,
        currency: &str,
        status: &str,
    ) -> Result<BitcoinPayment, sqlx::Error> {
        let created = Utc::now();
        let id = sqlx::query(
            "INSERT INTO bitcoin_payments (order_id, charge_id, amount_cents, currency, status, created) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(charge_id)
        .bind(amount.cents())
        .bind(currency)
        .bind(status)
        .bind(created)
        .execute(self.pool)
        .await?
        .last_insert_rowid();

        Ok(BitcoinPayment {
            id,
            order_id: order_id.to_string(),
            charge_id: charge_id.to_string(),
            amount_cents: amount.cents(),
            currency: currency.to_string(),
            status: status.to_string(),
            created,
        })
    }

    /// All recorded charges for a storefront order id
    pub async fn for_order(&self, order_id: &str) -> Result<Vec<BitcoinPayment>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM bitcoin_payments WHERE order_id = ? ORDER BY id")
            .bind(order_id)
            .fetch_all(self.pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_schema, memory_pool};

    #[tokio::test]
    async fn test_record_roundtrip() {
        let pool = memory_pool().await.expect("pool");
        init_schema(&pool).await.expect("schema");
        let store = PaymentStore::new(&pool);

        let recorded = store
            .record("order_abc", "charge_1", Price::from_major(35.0), "USD", "waiting")
            .await
            .unwrap();
        assert_eq!(recorded.amount_cents, 3500);

        let found = store.for_order("order_abc").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].charge_id, "charge_1");
        assert_eq!(found[0].status, "waiting");

        assert!(store.for_order("order_missing").await.unwrap().is_empty());
    }
}
