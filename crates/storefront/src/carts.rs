//! Session-scoped carts.
//!
//! Every browsing session owns at most one [`Cart`]. The session only stores
//! the [`CartId`]; the cart itself lives in the [`CartRegistry`] held by
//! [`AppState`], which drops carts that have been idle longer than the
//! configured timeout.
//!
//! Handlers never reach for a global. Mutating handlers take a
//! [`SessionCart`], which creates the cart on first use. Read-only handlers
//! take an [`ExistingCart`], which never creates a session or a cart, so
//! browsing without cookies costs no memory. Both fail loudly with
//! [`AppError::CartScope`] when the route is not behind the session layer.

use std::sync::Arc;

use artisan_market_core::{Cart, CartId, CartSummary, PricingPolicy};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use moka::future::Cache;
use tokio::sync::Mutex;
use tower_sessions::Session;

use crate::config::CartConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Session key under which the cart ID is stored.
pub const CART_ID_KEY: &str = "cart_id";

/// A cart shared between the requests of one session.
///
/// The mutex serialises mutations so they apply one at a time, in the order
/// the requests acquire it.
pub type SharedCart = Arc<Mutex<Cart>>;

/// In-memory owner of all live carts.
#[derive(Clone)]
pub struct CartRegistry {
    carts: Cache<CartId, SharedCart>,
}

impl CartRegistry {
    /// Create a registry with idle eviction and a capacity bound.
    #[must_use]
    pub fn new(config: &CartConfig) -> Self {
        let carts = Cache::builder()
            .max_capacity(config.max_carts)
            .time_to_idle(config.idle_timeout)
            .build();
        Self { carts }
    }

    /// Look up a live cart.
    pub async fn get(&self, id: CartId) -> Option<SharedCart> {
        self.carts.get(&id).await
    }

    /// Return the cart for `id`, creating an empty one if it does not exist
    /// or has been evicted.
    pub async fn get_or_create(&self, id: CartId) -> SharedCart {
        self.carts
            .get_with(id, async move {
                tracing::debug!(cart_id = %id, "Creating cart");
                Arc::new(Mutex::new(Cart::with_id(id)))
            })
            .await
    }

    /// Drop a cart immediately.
    pub async fn discard(&self, id: CartId) {
        self.carts.invalidate(&id).await;
    }

    /// Approximate number of live carts.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.carts.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush pending evictions and counters.
    pub async fn sync(&self) {
        self.carts.run_pending_tasks().await;
    }
}

/// Extractor yielding the current session's cart.
pub struct SessionCart {
    id: CartId,
    cart: SharedCart,
}

impl SessionCart {
    #[must_use]
    pub const fn id(&self) -> CartId {
        self.id
    }

    /// Mutate and return the result together with the resulting snapshot,
    /// both taken under the same lock.
    pub async fn mutate_and_summarize<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> (R, CartSummary) {
        let mut cart = self.cart.lock().await;
        let result = f(&mut cart);
        (result, cart.summary())
    }
}

fn request_session(parts: &Parts) -> Result<Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or(AppError::CartScope)
}

impl FromRequestParts<AppState> for SessionCart {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = request_session(parts)?;

        let id = if let Some(id) = session.get::<CartId>(CART_ID_KEY).await? {
            id
        } else {
            let id = CartId::generate();
            session.insert(CART_ID_KEY, id).await?;
            tracing::info!(cart_id = %id, "Assigned cart to session");
            id
        };

        let cart = state.carts().get_or_create(id).await;
        Ok(Self { id, cart })
    }
}

/// Extractor yielding the current session's cart only if it already exists.
pub struct ExistingCart(Option<SessionCart>);

impl ExistingCart {
    #[must_use]
    pub fn id(&self) -> Option<CartId> {
        self.0.as_ref().map(SessionCart::id)
    }

    /// Read the cart under its lock, or `None` when there is no cart.
    pub async fn read<R>(&self, f: impl FnOnce(&Cart) -> R) -> Option<R> {
        match &self.0 {
            Some(cart) => Some(f(&*cart.cart.lock().await)),
            None => None,
        }
    }

    /// Current snapshot, or the empty summary when there is no cart.
    pub async fn summary(&self) -> CartSummary {
        self.read(Cart::summary)
            .await
            .unwrap_or_else(|| CartSummary::empty(PricingPolicy::STANDARD.currency))
    }
}

impl FromRequestParts<AppState> for ExistingCart {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = request_session(parts)?;

        let Some(id) = session.get::<CartId>(CART_ID_KEY).await? else {
            return Ok(Self(None));
        };
        let cart = state.carts().get(id).await;
        Ok(Self(cart.map(|cart| SessionCart { id, cart })))
    }
}
