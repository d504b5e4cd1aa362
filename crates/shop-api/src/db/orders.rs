//! # Order Ledger Repository
//!
//! Checkout persistence. Creating an order writes the order row, its items,
//! and the stock decrements in a single transaction: all of it commits or
//! none of it does.

use chrono::Utc;
use sqlx::SqlitePool;

use shop_core::{Cart, CheckoutDetails, Order, OrderItem};

/// Repository for orders and order items
pub struct OrderStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderStore<'a> {
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create an order from the cart.
    ///
    /// Each cart line becomes an order item snapshotting the captured price
    /// and quantity. Stock is decremented only where the recorded stock
    /// covers the requested quantity; a line that does not fit leaves its
    /// product's stock untouched without failing the order.
    pub async fn create(
        &self,
        details: &CheckoutDetails,
        cart: &Cart,
    ) -> Result<(Order, Vec<OrderItem>), sqlx::Error> {
        let created = Utc::now();
        let total_cents = cart.total().cents();

        let mut tx = self.pool.begin().await?;

        let order_id = sqlx::query(
            "INSERT INTO orders (full_name, email, address, total_cents, paid, created) \
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(&details.full_name)
        .bind(&details.email)
        .bind(&details.address)
        .bind(total_cents)
        .bind(created)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let mut items = Vec::with_capacity(cart.lines().len());
        for line in cart.lines() {
            let quantity = i64::from(line.quantity);

            let item_id = sqlx::query(
                "INSERT INTO order_items (order_id, product_id, price_cents, quantity) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.price_cents)
            .bind(quantity)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            // Guarded decrement: zero rows affected means insufficient stock,
            // which is not an error here
            sqlx::query(
                "UPDATE products SET stock = stock - ?, updated = ? \
                 WHERE id = ? AND stock >= ?",
            )
            .bind(quantity)
            .bind(created)
            .bind(line.product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

            items.push(OrderItem {
                id: item_id,
                order_id,
                product_id: line.product_id,
                price_cents: line.price_cents,
                quantity,
            });
        }

        tx.commit().await?;

        Ok((
            Order {
                id: order_id,
                full_name: details.full_name.clone(),
                email: details.email.clone(),
                address: details.address.clone(),
                total_cents,
                paid: false,
                created,
            },
            items,
        ))
    }

    /// Look up an order by id
    pub async fn by_id(&self, id: i64) -> Result<Option<Order>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await
    }

    /// Items belonging to an order
    pub async fn items(&self, order_id: i64) -> Result<Vec<OrderItem>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM order_items WHERE order_id = ? ORDER BY id")
            .bind(order_id)
            .fetch_all(self.pool)
            .await
    }

    /// Number of orders in the ledger
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(self.pool)
            .await
    }

    /// Delete an order; its items go with it
    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_schema, memory_pool, ProductStore};
    use shop_core::{NewProduct, Price};

    async fn test_pool() -> SqlitePool {
        let pool = memory_pool().await.expect("pool");
        init_schema(&pool).await.expect("schema");
        pool
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            full_name: "Ash Ketchum".to_string(),
            email: "ash@pallet.town".to_string(),
            address: "1 Pallet Town".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_snapshots_and_decrements() {
        let pool = test_pool().await;
        let products = ProductStore::new(&pool);
        let orders = OrderStore::new(&pool);

        let product = products
            .create(NewProduct::new("Charizard", Price::from_major(10.0)).with_stock(5))
            .await
            .unwrap();

        let mut cart = Cart::default();
        cart.add(product.id, product.price(), 2);

        let (order, items) = orders.create(&details(), &cart).await.unwrap();

        assert_eq!(order.total_cents, 2000);
        assert!(!order.paid);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price_cents, 1000);
        assert_eq!(items[0].quantity, 2);

        let restocked = products.by_id(product.id).await.unwrap().unwrap();
        assert_eq!(restocked.stock, 3);

        // A later price change must not touch the snapshot
        products
            .update_price(product.id, Price::from_major(99.0))
            .await
            .unwrap();
        let stored = orders.items(order.id).await.unwrap();
        assert_eq!(stored[0].price_cents, 1000);
    }

    #[tokio::test]
    async fn test_insufficient_stock_skips_decrement() {
        let pool = test_pool().await;
        let products = ProductStore::new(&pool);
        let orders = OrderStore::new(&pool);

        let product = products
            .create(NewProduct::new("Pikachu", Price::from_major(5.0)).with_stock(3))
            .await
            .unwrap();

        let mut cart = Cart::default();
        cart.add(product.id, product.price(), 10);

        let (order, items) = orders.create(&details(), &cart).await.unwrap();

        // Order and item exist, stock is untouched
        assert_eq!(items[0].quantity, 10);
        assert!(orders.by_id(order.id).await.unwrap().is_some());
        let unchanged = products.by_id(product.id).await.unwrap().unwrap();
        assert_eq!(unchanged.stock, 3);
    }

    #[tokio::test]
    async fn test_unknown_product_rolls_back_everything() {
        let pool = test_pool().await;
        let orders = OrderStore::new(&pool);

        let mut cart = Cart::default();
        cart.add(4242, Price::from_major(5.0), 1);

        // Foreign key failure on the item insert must leave no order behind
        assert!(orders.create(&details(), &cart).await.is_err());
        assert_eq!(orders.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_items_cascade_with_order() {
        let pool = test_pool().await;
        let products = ProductStore::new(&pool);
        let orders = OrderStore::new(&pool);

        let product = products
            .create(NewProduct::new("Squirtle", Price::from_major(3.0)).with_stock(9))
            .await
            .unwrap();

        let mut cart = Cart::default();
        cart.add(product.id, product.price(), 1);
        let (order, _) = orders.create(&details(), &cart).await.unwrap();

        // The referenced product cannot be deleted while the item exists
        assert!(products.delete(product.id).await.is_err());

        orders.delete(order.id).await.unwrap();
        assert!(orders.items(order.id).await.unwrap().is_empty());

        // With the item gone the product can be removed
        products.delete(product.id).await.unwrap();
    }
}
