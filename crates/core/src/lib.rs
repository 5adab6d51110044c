//! Artisan Market Core - Shared types and the cart state machine.
//!
//! This crate provides the domain model used across all Artisan Market components:
//! - `storefront` - Public-facing catalog and cart API
//! - `cli` - Offline catalog listing and cart quotes
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! HTTP, no clocks. Every cart mutation is a synchronous transformation of an
//! owned [`Cart`], so it can be driven from a request handler, a CLI or a test
//! in exactly the same way.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and integer-cent money
//! - [`cart`] - Line items, derived totals and the cart reducer
//! - [`catalog`] - The product catalog that feeds the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{
    AddOutcome, Cart, CartAction, CartEvent, CartLineItem, CartSummary, CartTotals, PricingPolicy,
    ProductSnapshot, RemoveOutcome, UpdateOutcome,
};
pub use catalog::{Catalog, CatalogError};
pub use types::*;
