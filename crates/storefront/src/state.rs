//! Application state shared across handlers.

use std::sync::Arc;

use artisan_market_core::Catalog;

use crate::carts::CartRegistry;
use crate::config::StorefrontConfig;
use crate::middleware::SessionRegistry;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and is the single owner of the
/// catalog, of every session's cart and of the sessions themselves.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    carts: CartRegistry,
    sessions: SessionRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Products available for sale
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let carts = CartRegistry::new(&config.carts);
        let sessions = SessionRegistry::new(&config.carts);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
                sessions,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart registry.
    #[must_use]
    pub fn carts(&self) -> &CartRegistry {
        &self.inner.carts
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn sessions(&self) -> &SessionRegistry {
        &self.inner.sessions
    }
}
