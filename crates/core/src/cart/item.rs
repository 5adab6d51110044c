//! Cart line items and the product descriptors they are created from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Money, ProductId};

/// A product as it is handed to the cart: every line item field except the
/// quantity.
///
/// The snapshot is copied into the cart on first add and never refreshed, so
/// the price a shopper saw when adding is the price they are charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    /// Unit price at the time of add.
    pub price: Money,
    /// Pre-discount reference price, for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    /// Advisory; the cart does not enforce stock.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Advisory; the cart does not enforce stock.
    #[serde(default)]
    pub stock_quantity: u32,
    /// Free-form attributes such as color or size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<BTreeMap<String, String>>,
}

const fn default_in_stock() -> bool {
    true
}

impl ProductSnapshot {
    /// Create a minimal in-stock snapshot with just an id, name and price.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: String::new(),
            image: String::new(),
            images: None,
            price,
            original_price: None,
            brand: None,
            seller: None,
            in_stock: true,
            stock_quantity: 0,
            variants: None,
        }
    }

    /// Whole-percent discount against the original price, rounded to nearest.
    ///
    /// Zero when there is no original price or it is not above the price.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        let Some(original) = self.original_price else {
            return 0;
        };
        let original = i128::from(original.cents());
        let price = i128::from(self.price.cents());
        if original <= price || original <= 0 {
            return 0;
        }
        let percent = ((original - price) * 200 + original) / (original * 2);
        u32::try_from(percent).unwrap_or(0)
    }

    /// Images to show, falling back to the primary image.
    #[must_use]
    pub fn gallery(&self) -> Vec<&str> {
        match &self.images {
            Some(images) if !images.is_empty() => images.iter().map(String::as_str).collect(),
            _ => vec![self.image.as_str()],
        }
    }
}

/// One distinct entry in the cart: a product and how many of it.
///
/// `quantity` is always at least 1; a line whose quantity would drop to zero
/// is removed from the cart instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub quantity: u32,
}

impl CartLineItem {
    pub(crate) const fn new(product: ProductSnapshot) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product identifier this line is keyed by.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}
