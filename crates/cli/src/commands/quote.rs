//! `am-cli quote` - price a cart offline.

use std::fmt::Write as _;

use artisan_market_core::{Cart, CartAction, Catalog, ProductId};

/// A cart built from a list of product ids.
#[derive(Debug)]
pub struct Quote {
    pub cart: Cart,
    /// Ids that were not in the catalog, in the order given.
    pub unknown: Vec<ProductId>,
}

/// Add one unit per id to a fresh cart. Unknown ids are collected, not fatal.
pub fn build(catalog: &Catalog, product_ids: &[String]) -> Quote {
    let mut cart = Cart::new();
    let mut unknown = Vec::new();

    for id in product_ids {
        let id = ProductId::new(id.as_str());
        match catalog.get(&id) {
            Some(product) => {
                let event = cart.apply(CartAction::Add(product.clone()));
                tracing::debug!(product_id = %id, ?event, "Added to quote");
            }
            None => unknown.push(id),
        }
    }

    Quote { cart, unknown }
}

impl Quote {
    /// Render line items and totals.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for line in self.cart.items() {
            let _ = writeln!(
                out,
                "{:>3} x {:<40} {:>12}",
                line.quantity,
                line.product.name,
                line.line_total().to_string()
            );
        }
        if !self.cart.is_empty() {
            out.push('\n');
        }

        let rows = [
            ("Items", self.cart.total_items().to_string()),
            ("Subtotal", self.cart.subtotal().to_string()),
            ("Tax", self.cart.tax().to_string()),
            ("Shipping", shipping_label(&self.cart)),
            ("Total", self.cart.total().to_string()),
        ];
        for (label, value) in rows {
            let _ = writeln!(out, "{label:<10} {value:>12}");
        }

        if !self.unknown.is_empty() {
            let ids: Vec<&str> = self.unknown.iter().map(ProductId::as_str).collect();
            let _ = writeln!(out, "\nSkipped unknown products: {}", ids.join(", "));
        }
        out
    }
}

fn shipping_label(cart: &Cart) -> String {
    if cart.shipping().is_zero() && !cart.is_empty() {
        "FREE".to_string()
    } else {
        cart.shipping().to_string()
    }
}
