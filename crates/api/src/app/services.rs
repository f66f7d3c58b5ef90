use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;

use pizzeria_core::DomainError;
use pizzeria_infra::{
    AppConfig, DirectOrderService, InMemoryCatalog, InMemoryOrderSink, InMemorySessionStore,
};
use pizzeria_ussd::{CatalogStore, OrderSink, SessionStore, StoreError, UssdMachine};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("store setup failed: {0}")]
    Store(#[from] StoreError),
    #[error("default menu is invalid: {0}")]
    Seed(#[from] DomainError),
}

/// Everything the handlers need, injected as an `Extension`.
#[derive(Clone)]
pub struct AppServices {
    pub machine: UssdMachine,
    pub orders: DirectOrderService,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppServices {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        sessions: Arc<dyn SessionStore>,
        orders: Arc<dyn OrderSink>,
    ) -> Self {
        Self {
            machine: UssdMachine::new(catalog.clone(), sessions.clone(), orders.clone()),
            orders: DirectOrderService::new(catalog, orders),
            sessions,
        }
    }
}

pub async fn build_services(config: &AppConfig) -> Result<AppServices, BuildError> {
    if let Some(persistent) = &config.persistent {
        #[cfg(feature = "redis")]
        {
            return build_persistent_services(persistent, config.session_ttl).await;
        }
        #[cfg(not(feature = "redis"))]
        {
            let _ = persistent;
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but redis feature not enabled, falling back to in-memory"
            );
        }
    }

    build_in_memory_services(config.session_ttl)
}

pub fn build_in_memory_services(session_ttl: Duration) -> Result<AppServices, BuildError> {
    let catalog = Arc::new(InMemoryCatalog::seeded()?);
    let sessions = Arc::new(InMemorySessionStore::new(session_ttl));
    let orders = Arc::new(InMemoryOrderSink::new());

    tracing::info!(ttl_secs = session_ttl.as_secs(), "using in-memory stores");
    Ok(AppServices::new(catalog, sessions, orders))
}

#[cfg(feature = "redis")]
async fn build_persistent_services(
    persistent: &pizzeria_infra::config::PersistentConfig,
    session_ttl: Duration,
) -> Result<AppServices, BuildError> {
    use pizzeria_infra::{postgres, PostgresCatalog, PostgresOrderSink, RedisSessionStore};

    let pool = postgres::connect(&persistent.database_url).await?;
    postgres::seed_if_empty(&pool).await?;

    let catalog = Arc::new(PostgresCatalog::new(pool.clone()));
    let orders = Arc::new(PostgresOrderSink::new(pool));
    let sessions = Arc::new(RedisSessionStore::new(&persistent.redis_url, session_ttl)?);

    tracing::info!(ttl_secs = session_ttl.as_secs(), "using postgres catalog/orders and redis sessions");
    Ok(AppServices::new(catalog, sessions, orders))
}

/// Periodically drop expired sessions. Backends with native expiry purge nothing.
pub fn spawn_session_sweeper(sessions: Arc<dyn SessionStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => tracing::debug!(purged, "session sweep"),
                Err(e) => tracing::warn!(error = %e, "session sweep failed"),
            }
        }
    })
}
