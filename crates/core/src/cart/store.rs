//! The cart state machine.
//!
//! There is a single state holding the items and their derived totals. Each
//! transition is a synchronous, side-effect-free update of that state followed
//! by a full recomputation of the totals, so no reader ever observes totals
//! that disagree with the items.

use serde::{Deserialize, Serialize};

use super::item::{CartLineItem, ProductSnapshot};
use super::totals::{CartTotals, PricingPolicy};
use crate::types::{CartId, CurrencyCode, Money, ProductId};

/// Result of [`Cart::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Added,
    /// The product was already in the cart; its quantity went up by one.
    Incremented { quantity: u32 },
    /// The product is priced in a currency the cart does not bill in. The
    /// cart is unchanged.
    CurrencyMismatch {
        expected: CurrencyCode,
        found: CurrencyCode,
    },
}

/// Result of [`Cart::remove_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Result of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// The line now has exactly this quantity.
    Updated { quantity: u32 },
    /// A non-positive quantity removed the line.
    Removed,
    NotFound,
}

/// A cart transition, for callers that dispatch rather than call methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    Add(ProductSnapshot),
    Remove(ProductId),
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    Clear,
}

/// What a dispatched [`CartAction`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CartEvent {
    Add(AddOutcome),
    Remove(RemoveOutcome),
    UpdateQuantity(UpdateOutcome),
    Clear { lines: usize },
}

/// A shopping cart: ordered line items plus totals derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: CartId,
    policy: PricingPolicy,
    items: Vec<CartLineItem>,
    totals: CartTotals,
}

/// Read-only snapshot of a cart, as handed to renderers and API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Absent for a shopper who has no cart yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    pub items: Vec<CartLineItem>,
    #[serde(flatten)]
    pub totals: CartTotals,
}

impl CartSummary {
    /// What a cart that was never created looks like.
    #[must_use]
    pub const fn empty(currency: CurrencyCode) -> Self {
        Self {
            id: None,
            items: Vec::new(),
            totals: CartTotals::empty(currency),
        }
    }
}

impl Cart {
    /// Create an empty cart with a fresh ID and the standard pricing policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(CartId::generate())
    }

    /// Create an empty cart with the given ID.
    #[must_use]
    pub const fn with_id(id: CartId) -> Self {
        Self::with_policy(id, PricingPolicy::STANDARD)
    }

    /// Create an empty cart with the given ID and pricing policy.
    #[must_use]
    pub const fn with_policy(id: CartId, policy: PricingPolicy) -> Self {
        Self {
            id,
            policy,
            items: Vec::new(),
            totals: CartTotals::empty(policy.currency),
        }
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its quantity incremented; its stored
    /// snapshot (and price) is left as it was. Otherwise a new line with
    /// quantity 1 is appended at the end. Products priced in another currency
    /// than the cart's policy are refused.
    pub fn add_item(&mut self, product: ProductSnapshot) -> AddOutcome {
        let found = product.price.currency();
        if found != self.policy.currency {
            return AddOutcome::CurrencyMismatch {
                expected: self.policy.currency,
                found,
            };
        }

        let outcome = if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(1);
            AddOutcome::Incremented {
                quantity: line.quantity,
            }
        } else {
            self.items.push(CartLineItem::new(product));
            AddOutcome::Added
        };
        self.recompute();
        outcome
    }

    /// Remove the line for a product. Absent products are not an error.
    pub fn remove_item(&mut self, product_id: &ProductId) -> RemoveOutcome {
        let before = self.items.len();
        self.items.retain(|line| line.id() != product_id);
        self.recompute();
        if self.items.len() < before {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::NotFound
        }
    }

    /// Set a product's quantity to an absolute value.
    ///
    /// Zero or below removes the line. Values above `u32::MAX` saturate.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> UpdateOutcome {
        if quantity <= 0 {
            return match self.remove_item(product_id) {
                RemoveOutcome::Removed => UpdateOutcome::Removed,
                RemoveOutcome::NotFound => UpdateOutcome::NotFound,
            };
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let outcome = match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                UpdateOutcome::Updated { quantity }
            }
            None => UpdateOutcome::NotFound,
        };
        self.recompute();
        outcome
    }

    /// Empty the cart. Returns how many lines were dropped.
    pub fn clear(&mut self) -> usize {
        let lines = self.items.len();
        self.items.clear();
        self.recompute();
        lines
    }

    /// Apply a transition described as data.
    pub fn apply(&mut self, action: CartAction) -> CartEvent {
        match action {
            CartAction::Add(product) => CartEvent::Add(self.add_item(product)),
            CartAction::Remove(product_id) => CartEvent::Remove(self.remove_item(&product_id)),
            CartAction::UpdateQuantity {
                product_id,
                quantity,
            } => CartEvent::UpdateQuantity(self.update_quantity(&product_id, quantity)),
            CartAction::Clear => CartEvent::Clear {
                lines: self.clear(),
            },
        }
    }

    #[must_use]
    pub const fn id(&self) -> CartId {
        self.id
    }

    #[must_use]
    pub const fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Line items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.id() == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn totals(&self) -> &CartTotals {
        &self.totals
    }

    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.totals.total_items
    }

    #[must_use]
    pub const fn subtotal(&self) -> Money {
        self.totals.subtotal
    }

    #[must_use]
    pub const fn tax(&self) -> Money {
        self.totals.tax
    }

    #[must_use]
    pub const fn shipping(&self) -> Money {
        self.totals.shipping
    }

    #[must_use]
    pub const fn total(&self) -> Money {
        self.totals.total
    }

    /// Owned snapshot of the items and totals.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            id: Some(self.id),
            items: self.items.clone(),
            totals: self.totals,
        }
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|line| line.id() == product_id)
    }

    fn recompute(&mut self) {
        self.totals = self.policy.totals(&self.items);
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
