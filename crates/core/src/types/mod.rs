//! Core types for Artisan Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{CurrencyCode, Money, MoneyError};
