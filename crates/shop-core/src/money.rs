//! # Money Handling
//!
//! Prices are carried as integer cents to keep arithmetic exact; the display
//! currency is a per-product label (the store historically sold in several
//! symbols), so `Price` stays symbol-agnostic and formats on demand.

use serde::{Deserialize, Serialize};

/// An amount in integer cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    /// Create a price from a decimal amount (e.g. `10.99` -> 1099 cents)
    pub fn from_major(amount: f64) -> Self {
        Self((amount * 100.0).round() as i64)
    }

    /// Create a price from cents
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Amount in cents
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Decimal amount (e.g. 1099 cents -> `10.99`)
    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiply by a quantity
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * i64::from(quantity))
    }

    /// Format with a currency symbol (e.g. `"$10.00"`)
    pub fn display(&self, symbol: &str) -> String {
        format!("{}{:.2}", symbol, self.as_major())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_conversion() {
        assert_eq!(Price::from_major(10.99).cents(), 1099);
        assert_eq!(Price::from_major(5.0).cents(), 500);
        assert_eq!(Price::from_cents(1099).as_major(), 10.99);
    }

    #[test]
    fn test_times() {
        assert_eq!(Price::from_major(10.0).times(3).cents(), 3000);
        assert_eq!(Price::from_cents(0).times(7).cents(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_major(29.99).display("$"), "$29.99");
        assert_eq!(Price::from_cents(500).display("FCFA "), "FCFA 5.00");
    }
}
