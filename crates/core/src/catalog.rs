//! Product catalog that feeds the cart.
//!
//! The catalog is an ordered, duplicate-free list of [`ProductSnapshot`]s, all
//! priced in the currency carts bill in. Adding to a cart always starts from a
//! catalog entry.

use std::collections::HashSet;

use thiserror::Error;

use crate::cart::{PricingPolicy, ProductSnapshot};
use crate::types::{CurrencyCode, ProductId};

/// The bundled sample catalog.
const SAMPLE_CATALOG: &str = include_str!("../data/catalog.json");

/// Errors that can occur when loading a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("product {id} is priced in {found:?}, catalog currency is {expected:?}")]
    WrongCurrency {
        id: ProductId,
        expected: CurrencyCode,
        found: CurrencyCode,
    },
}

/// An ordered set of products, unique by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ProductSnapshot>,
}

impl Catalog {
    /// Build a catalog for carts on the standard pricing policy.
    ///
    /// # Errors
    ///
    /// Returns an error on a repeated product id or when a product is not
    /// priced in the standard policy's currency.
    pub fn new(products: Vec<ProductSnapshot>) -> Result<Self, CatalogError> {
        Self::priced_in(products, PricingPolicy::STANDARD.currency)
    }

    /// Build a catalog whose every price is in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error on a repeated product id or when a price or original
    /// price is in another currency.
    pub fn priced_in(
        products: Vec<ProductSnapshot>,
        currency: CurrencyCode,
    ) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            let prices = std::iter::once(product.price).chain(product.original_price);
            if let Some(found) = prices.map(|m| m.currency()).find(|c| *c != currency) {
                return Err(CatalogError::WrongCurrency {
                    id: product.id.clone(),
                    expected: currency,
                    found,
                });
            }
        }

        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`Catalog::new`]
    /// validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// The artisan catalog shipped with the application.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled data is invalid.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&ProductSnapshot> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductSnapshot> {
        self.products.iter()
    }

    /// Products in a category, compared case-insensitively.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ProductSnapshot> {
        self.products
            .iter()
            .filter(move |p| p.category.eq_ignore_ascii_case(category))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
