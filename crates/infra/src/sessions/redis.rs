//! Redis-backed session store.
//!
//! Each session is one JSON string under `<prefix>:<session_id>`, written with
//! `SET EX` so Redis expires idle sessions itself. The sync client runs on
//! the blocking pool; one connection per call.

use std::time::Duration;

use async_trait::async_trait;
use redis::Commands;
use tracing::instrument;

use pizzeria_core::SessionId;
use pizzeria_ussd::{SessionState, SessionStore, StoreError};

pub const DEFAULT_KEY_PREFIX: &str = "pizzeria:session";

#[derive(Debug, Clone)]
pub struct RedisSessionStore {
    client: redis::Client,
    prefix: String,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(redis_url: impl AsRef<str>, ttl: Duration) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url.as_ref()).map_err(StoreError::backend)?;
        Ok(Self {
            client,
            prefix: DEFAULT_KEY_PREFIX.to_string(),
            ttl_secs: ttl.as_secs().max(1),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn key(&self, id: &SessionId) -> String {
        format!("{}:{}", self.prefix, id)
    }

    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut redis::Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let client = self.client.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = client.get_connection().map_err(StoreError::backend)?;
            op(&mut conn)
        })
        .await
        .map_err(StoreError::backend)?
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    #[instrument(skip(self), fields(session_id = %id), err)]
    async fn load(&self, id: &SessionId) -> Result<Option<SessionState>, StoreError> {
        let key = self.key(id);
        let payload: Option<String> = self
            .with_conn(move |conn| conn.get(key).map_err(StoreError::backend))
            .await?;

        payload
            .map(|p| serde_json::from_str(&p).map_err(StoreError::serialization))
            .transpose()
    }

    #[instrument(skip(self, state), fields(session_id = %state.session_id()), err)]
    async fn save(&self, state: &SessionState) -> Result<(), StoreError> {
        let key = self.key(state.session_id());
        let payload = serde_json::to_string(state).map_err(StoreError::serialization)?;
        let ttl = self.ttl_secs;
        self.with_conn(move |conn| {
            conn.set_ex::<_, _, ()>(key, payload, ttl)
                .map_err(StoreError::backend)
        })
        .await
    }

    #[instrument(skip(self), fields(session_id = %id), err)]
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        let key = self.key(id);
        self.with_conn(move |conn| conn.del::<_, ()>(key).map_err(StoreError::backend))
            .await
    }
}
