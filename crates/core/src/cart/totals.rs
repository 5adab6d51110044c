//! Derived cart totals.

use serde::{Deserialize, Serialize};

use super::item::CartLineItem;
use crate::types::{CurrencyCode, Money};

/// Tax and shipping rules applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    pub currency: CurrencyCode,
    /// Sales tax in basis points of the subtotal.
    pub tax_rate_bps: u32,
    /// Shipping is free when the subtotal is strictly greater than this.
    pub free_shipping_over: Money,
    /// Shipping charged otherwise.
    pub flat_shipping: Money,
}

impl PricingPolicy {
    /// 8% tax, free shipping over $50.00, $9.99 otherwise.
    pub const STANDARD: Self = Self {
        currency: CurrencyCode::USD,
        tax_rate_bps: 800,
        free_shipping_over: Money::from_cents(5000, CurrencyCode::USD),
        flat_shipping: Money::from_cents(999, CurrencyCode::USD),
    };

    /// Compute totals for a list of line items.
    ///
    /// Order: item count, subtotal, tax on the subtotal, shipping from the
    /// subtotal, then the grand total. An empty list yields all zeros.
    #[must_use]
    pub fn totals(&self, items: &[CartLineItem]) -> CartTotals {
        if items.is_empty() {
            return CartTotals::empty(self.currency);
        }

        let total_items = items
            .iter()
            .fold(0_u64, |sum, item| sum.saturating_add(u64::from(item.quantity)));
        let subtotal = items
            .iter()
            .fold(Money::zero(self.currency), |sum, item| sum + item.line_total());
        let tax = subtotal.percent_bps(self.tax_rate_bps);
        let shipping = if subtotal.cents() > self.free_shipping_over.cents() {
            Money::zero(self.currency)
        } else {
            self.flat_shipping
        };
        let total = subtotal + tax + shipping;

        CartTotals {
            total_items,
            subtotal,
            tax,
            shipping,
            total,
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Totals derived from a cart's items. Never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub total_items: u64,
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CartTotals {
    /// Totals of an empty cart: everything zero, including shipping.
    #[must_use]
    pub const fn empty(currency: CurrencyCode) -> Self {
        Self {
            total_items: 0,
            subtotal: Money::zero(currency),
            tax: Money::zero(currency),
            shipping: Money::zero(currency),
            total: Money::zero(currency),
        }
    }
}
