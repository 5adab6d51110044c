//! Cart route handlers.
//!
//! Mutating requests resolve the session's cart through [`SessionCart`] and
//! apply at most one transition to it. Reads go through [`ExistingCart`] and
//! never create a cart. Responses carry the transition's
//! outcome next to the resulting cart snapshot, so clients can tell an item
//! that was removed from one that was never there.

use artisan_market_core::{
    AddOutcome, Cart, CartSummary, ProductId, RemoveOutcome, UpdateOutcome,
};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::carts::{ExistingCart, SessionCart};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    /// Absolute quantity. Zero or below removes the line.
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// A transition outcome and the cart it produced.
#[derive(Debug, Serialize)]
pub struct CartMutation<O> {
    #[serde(flatten)]
    pub outcome: O,
    pub cart: CartSummary,
}

/// Outcome of clearing the cart.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Cleared {
    /// Number of lines that were dropped.
    pub cleared: usize,
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub total_items: u64,
}

/// One line of the checkout review.
#[derive(Debug, Serialize)]
pub struct CheckoutLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Checkout review: the cart with display-formatted amounts.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub cart_id: String,
    pub lines: Vec<CheckoutLine>,
    pub total_items: u64,
    pub subtotal: String,
    pub tax: String,
    pub shipping: String,
    pub total: String,
    pub free_shipping: bool,
}

impl From<&Cart> for CheckoutView {
    fn from(cart: &Cart) -> Self {
        Self {
            cart_id: cart.id().to_string(),
            lines: cart
                .items()
                .iter()
                .map(|line| CheckoutLine {
                    product_id: line.id().clone(),
                    name: line.product.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.product.price.to_string(),
                    line_total: line.line_total().to_string(),
                })
                .collect(),
            total_items: cart.total_items(),
            subtotal: cart.subtotal().to_string(),
            tax: cart.tax().to_string(),
            shipping: cart.shipping().to_string(),
            total: cart.total().to_string(),
            free_shipping: cart.shipping().is_zero(),
        }
    }
}

/// Show the session's cart.
#[instrument(skip(cart), fields(cart_id = ?cart.id()))]
pub async fn show(cart: ExistingCart) -> Json<CartSummary> {
    Json(cart.summary().await)
}

/// Cart count badge.
#[instrument(skip(cart), fields(cart_id = ?cart.id()))]
pub async fn count(cart: ExistingCart) -> Json<CartCount> {
    let total_items = cart.read(Cart::total_items).await.unwrap_or(0);
    Json(CartCount { total_items })
}

/// Add one unit of a catalog product.
///
/// Unknown products are rejected before the cart is touched.
#[instrument(skip(state, cart), fields(cart_id = %cart.id()))]
pub async fn add(
    State(state): State<AppState>,
    cart: SessionCart,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartMutation<AddOutcome>>> {
    let product = state
        .catalog()
        .get(&request.product_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let (outcome, summary) = cart.mutate_and_summarize(|c| c.add_item(product)).await;

    if let AddOutcome::CurrencyMismatch { expected, found } = outcome {
        return Err(AppError::Internal(format!(
            "product {} is priced in {}, carts bill in {}",
            request.product_id,
            found.code(),
            expected.code()
        )));
    }

    tracing::info!(
        product_id = %request.product_id,
        ?outcome,
        total_items = summary.totals.total_items,
        "Added item to cart"
    );
    add_breadcrumb("cart", "add", &[("product_id", request.product_id.as_str())]);

    Ok(Json(CartMutation {
        outcome,
        cart: summary,
    }))
}

/// Set a line's quantity.
#[instrument(skip(cart), fields(cart_id = %cart.id()))]
pub async fn update(
    cart: SessionCart,
    Json(request): Json<UpdateCartRequest>,
) -> Json<CartMutation<UpdateOutcome>> {
    let (outcome, summary) = cart
        .mutate_and_summarize(|c| c.update_quantity(&request.product_id, request.quantity))
        .await;

    tracing::info!(
        product_id = %request.product_id,
        quantity = request.quantity,
        ?outcome,
        "Updated cart quantity"
    );
    add_breadcrumb("cart", "update", &[("product_id", request.product_id.as_str())]);

    Json(CartMutation {
        outcome,
        cart: summary,
    })
}

/// Remove a line.
#[instrument(skip(cart), fields(cart_id = %cart.id()))]
pub async fn remove(
    cart: SessionCart,
    Json(request): Json<RemoveFromCartRequest>,
) -> Json<CartMutation<RemoveOutcome>> {
    let (outcome, summary) = cart
        .mutate_and_summarize(|c| c.remove_item(&request.product_id))
        .await;

    tracing::info!(product_id = %request.product_id, ?outcome, "Removed item from cart");
    add_breadcrumb("cart", "remove", &[("product_id", request.product_id.as_str())]);

    Json(CartMutation {
        outcome,
        cart: summary,
    })
}

/// Empty the cart.
#[instrument(skip(cart), fields(cart_id = %cart.id()))]
pub async fn clear(cart: SessionCart) -> Json<CartMutation<Cleared>> {
    let (cleared, summary) = cart.mutate_and_summarize(Cart::clear).await;

    tracing::info!(cleared, "Cleared cart");
    add_breadcrumb("cart", "clear", &[]);

    Json(CartMutation {
        outcome: Cleared { cleared },
        cart: summary,
    })
}

/// Checkout review of the session's cart.
///
/// Payment is out of scope; this returns the priced order for confirmation.
#[instrument(skip(cart), fields(cart_id = ?cart.id()))]
pub async fn checkout(cart: ExistingCart) -> Result<Json<CheckoutView>> {
    let view = cart
        .read(|c| (!c.is_empty()).then(|| CheckoutView::from(c)))
        .await
        .flatten()
        .ok_or_else(|| AppError::BadRequest("cart is empty".to_string()))?;

    Ok(Json(view))
}
