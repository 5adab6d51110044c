//! Shopping cart domain.
//!
//! A [`Cart`] is an ordered list of [`CartLineItem`]s plus [`CartTotals`] that
//! are derived from the items after every mutation. The four transitions
//! (add, remove, set quantity, clear) never fail; each one reports what it did
//! through a tagged outcome so callers can tell "removed" from "was never
//! there".
//!
//! ```
//! use artisan_market_core::{Cart, Money, ProductId, ProductSnapshot};
//!
//! let mut cart = Cart::new();
//! cart.add_item(ProductSnapshot::new("a", "Clay Lamp", Money::parse("10").unwrap()));
//! assert_eq!(cart.total().to_string(), "$20.79");
//!
//! cart.update_quantity(&ProductId::new("a"), 6);
//! assert!(cart.shipping().is_zero());
//! assert_eq!(cart.total().to_string(), "$64.80");
//! ```

mod item;
mod store;
mod totals;

pub use item::{CartLineItem, ProductSnapshot};
pub use store::{
    AddOutcome, Cart, CartAction, CartEvent, CartSummary, RemoveOutcome, UpdateOutcome,
};
pub use totals::{CartTotals, PricingPolicy};
