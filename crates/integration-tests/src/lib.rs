//! Integration tests for Artisan Market.
//!
//! Each test starts a real storefront on a loopback port and drives it over
//! HTTP with a cookie-carrying `reqwest` client, the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p artisan-market-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Cart lifecycle, session isolation and checkout

use std::net::SocketAddr;

use artisan_market_core::Catalog;
use artisan_market_storefront::{app, config::StorefrontConfig, state::AppState};
use tokio::net::TcpListener;

/// A storefront running in the background of the current test runtime.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    /// Start a storefront serving `catalog` on an ephemeral loopback port.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn spawn(catalog: Catalog) -> std::io::Result<Self> {
        let config = StorefrontConfig::local();
        let listener = TcpListener::bind(config.socket_addr()).await?;
        let addr = listener.local_addr()?;

        let router = app(AppState::new(config, catalog));
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Test server stopped: {e}");
            }
        });

        Ok(Self { addr })
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A client with its own cookie jar, i.e. its own shopping session.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn session_client() -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder().cookie_store(true).build()
    }
}
