//! `am-cli catalog` - list products.

use std::fmt::Write as _;

use artisan_market_core::{Catalog, ProductSnapshot};

/// Render the catalog, or one category of it, as aligned text.
pub fn list(catalog: &Catalog, category: Option<&str>) -> String {
    let products: Vec<&ProductSnapshot> = match category {
        Some(category) => catalog.by_category(category).collect(),
        None => catalog.iter().collect(),
    };

    if products.is_empty() {
        return category.map_or_else(
            || "Catalog is empty\n".to_string(),
            |c| format!("No products in category {c:?}\n"),
        );
    }

    let mut out = String::new();
    for product in products {
        let _ = write!(
            out,
            "{:<4} {:<40} {:>12}",
            product.id,
            product.name,
            product.price.to_string()
        );
        match product.discount_percent() {
            0 => {}
            discount => {
                let _ = write!(out, "  (-{discount}%)");
            }
        }
        if !product.in_stock {
            out.push_str("  [out of stock]");
        }
        out.push('\n');
    }
    out
}
