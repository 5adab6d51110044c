//! CLI command implementations.
//!
//! Commands build their output as a `String` so they can be tested without
//! capturing stdout.

pub mod catalog;
pub mod quote;

use artisan_market_core::CatalogError;
use thiserror::Error;

/// Errors that can stop a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),
}
