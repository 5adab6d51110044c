//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions, backed by a moka cache so
//! that idle sessions are evicted on the same schedule as the carts they point
//! at. Nothing survives a restart.

use async_trait::async_trait;
use moka::future::Cache;
use time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore, session_store};

use crate::config::{CartConfig, StorefrontConfig};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "am_session";

/// Longest session inactivity window (1 year).
const MAX_SESSION_IDLE_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Session records held in a bounded, idle-evicting cache.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    records: Cache<Id, Record>,
}

impl SessionRegistry {
    /// Create a store sized and timed like the cart registry.
    #[must_use]
    pub fn new(config: &CartConfig) -> Self {
        let records = Cache::builder()
            .max_capacity(config.max_carts)
            .time_to_idle(config.idle_timeout)
            .build();
        Self { records }
    }

    /// Approximate number of stored sessions.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.records.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush pending evictions and counters.
    pub async fn sync(&self) {
        self.records.run_pending_tasks().await;
    }
}

#[async_trait]
impl SessionStore for SessionRegistry {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        loop {
            let entry = self.records.entry(record.id).or_insert(record.clone()).await;
            if entry.is_fresh() {
                return Ok(());
            }
            record.id = Id::default();
        }
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .records
            .get(session_id)
            .await
            .filter(|record| record.expiry_date > OffsetDateTime::now_utc()))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.records.invalidate(session_id).await;
        Ok(())
    }
}

/// Create the session layer over the given store.
///
/// Sessions expire after the same period of inactivity as carts.
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
    store: SessionRegistry,
) -> SessionManagerLayer<SessionRegistry> {
    let idle_seconds = i64::try_from(config.carts.idle_timeout.as_secs())
        .unwrap_or(MAX_SESSION_IDLE_SECONDS)
        .min(MAX_SESSION_IDLE_SECONDS);

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(idle_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
