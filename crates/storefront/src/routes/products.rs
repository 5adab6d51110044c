//! Product catalog route handlers.

use artisan_market_core::{ProductId, ProductSnapshot};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data: the catalog entry plus derived display fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    /// Formatted unit price (e.g. "$24.99").
    pub display_price: String,
    /// Whole-percent discount against the original price.
    pub discount_percent: u32,
    pub gallery: Vec<String>,
}

impl From<&ProductSnapshot> for ProductView {
    fn from(product: &ProductSnapshot) -> Self {
        Self {
            display_price: product.price.to_string(),
            discount_percent: product.discount_percent(),
            gallery: product.gallery().into_iter().map(String::from).collect(),
            product: product.clone(),
        }
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<ProductView>,
    pub count: usize,
}

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
}

/// List catalog products, optionally filtered by category.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<ProductList> {
    let catalog = state.catalog();
    let products: Vec<ProductView> = match query.category.as_deref() {
        Some(category) => catalog.by_category(category).map(ProductView::from).collect(),
        None => catalog.iter().map(ProductView::from).collect(),
    };

    Json(ProductList {
        count: products.len(),
        products,
    })
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ProductView>> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductView::from(product)))
}
