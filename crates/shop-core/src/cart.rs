//! # Shopping Cart
//!
//! The per-session cart: product id mapped to the price captured at add time
//! and an accumulated quantity. The cart itself is a plain serializable value;
//! the HTTP layer owns reading it from and writing it back to the session on
//! every mutation.
//!
//! Lines keep their insertion order, and a repeated add accumulates quantity
//! on the existing line rather than appending a new one.

use serde::{Deserialize, Serialize};

use crate::money::Price;

/// One cart line: a product with captured price and quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog product id
    pub product_id: i64,

    /// Unit price in cents, captured when the line was first added
    pub price_cents: i64,

    /// Accumulated quantity
    pub quantity: u32,
}

impl CartLine {
    /// Captured unit price
    pub fn price(&self) -> Price {
        Price::from_cents(self.price_cents)
    }

    /// Line subtotal (price x quantity)
    pub fn subtotal(&self) -> Price {
        self.price().times(self.quantity)
    }
}

/// A session-backed shopping cart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add a product to the cart.
    ///
    /// A product already in the cart keeps its originally captured price and
    /// accumulates quantity; a new product is appended with `price` captured
    /// as-is. No stock check happens here and no upper bound is enforced.
    pub fn add(&mut self, product_id: i64, price: Price, quantity: u32) {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine {
                product_id,
                price_cents: price.cents(),
                quantity,
            }),
        }
    }

    /// Remove a product's line. Removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of price x quantity over all lines
    pub fn total(&self) -> Price {
        Price::from_cents(
            self.lines
                .iter()
                .map(|l| l.subtotal().cents())
                .sum(),
        )
    }

    /// Total number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// A cart with no units is empty
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_add_accumulates() {
        let mut cart = Cart::default();
        cart.add(1, Price::from_major(4.5), 2);
        cart.add(1, Price::from_major(4.5), 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_keeps_captured_price() {
        let mut cart = Cart::default();
        cart.add(1, Price::from_major(10.0), 1);
        // Catalog price moved; the line keeps what it captured
        cart.add(1, Price::from_major(12.0), 1);

        assert_eq!(cart.lines()[0].price_cents, 1000);
        assert_eq!(cart.total().cents(), 2000);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::default();
        cart.add(1, Price::from_major(10.0), 1);
        cart.remove(99);

        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::default();
        cart.add(1, Price::from_major(10.0), 2);
        cart.add(2, Price::from_major(5.0), 3);

        assert_eq!(cart.total().cents(), 3500);
        assert_eq!(cart.total().display("$"), "$35.00");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = Cart::default();
        cart.add(3, Price::from_cents(100), 1);
        cart.add(1, Price::from_cents(200), 1);
        cart.add(2, Price::from_cents(300), 1);

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_clear_and_emptiness() {
        let mut cart = Cart::default();
        assert!(cart.is_empty());

        cart.add(1, Price::from_cents(100), 2);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total().cents(), 0);
    }

    #[test]
    fn test_session_roundtrip() {
        let mut cart = Cart::default();
        cart.add(7, Price::from_major(99.99), 2);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
