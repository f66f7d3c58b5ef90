use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::debug;

use pizzeria_core::SessionId;
use pizzeria_ussd::{SessionState, SessionStore, StoreError};

#[derive(Debug, Clone)]
struct Entry {
    state: SessionState,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-memory session store for tests/dev.
///
/// Every `save` pushes the expiry `ttl` into the future. Expired entries are
/// invisible to `load` and removed by `purge_expired`.
#[derive(Debug)]
pub struct InMemorySessionStore {
    ttl: Duration,
    inner: RwLock<HashMap<SessionId, Entry>>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("session lock poisoned")
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionState>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let now = Instant::now();
        Ok(map
            .get(id)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.state.clone()))
    }

    async fn save(&self, state: &SessionState) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(
            state.session_id().clone(),
            Entry {
                state: state.clone(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.remove(id);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let now = Instant::now();
        let before = map.len();
        map.retain(|_, entry| entry.is_live(now));
        let purged = before - map.len();
        if purged > 0 {
            debug!(purged, remaining = map.len(), "purged expired sessions");
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_ussd::Stage;

    fn sid(raw: &str) -> SessionId {
        SessionId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn unknown_session_initialises_at_main_menu() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let state = store.get_or_init(&sid("s1")).await.unwrap();
        assert_eq!(state.stage(), Stage::MainMenu);
        assert!(store.is_empty(), "get_or_init must not persist");
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let mut state = SessionState::new(sid("s1"));
        state.advance().unwrap();
        store.save(&state).await.unwrap();

        assert_eq!(store.load(&sid("s1")).await.unwrap(), Some(state));
        store.delete(&sid("s1")).await.unwrap();
        assert_eq!(store.load(&sid("s1")).await.unwrap(), None);
        store.delete(&sid("s1")).await.unwrap();
    }

    #[tokio::test]
    async fn expired_sessions_are_hidden_and_purged() {
        let store = InMemorySessionStore::new(Duration::ZERO);
        let mut state = SessionState::new(sid("s1"));
        state.advance().unwrap();
        store.save(&state).await.unwrap();

        assert_eq!(store.load(&sid("s1")).await.unwrap(), None);
        assert_eq!(
            store.get_or_init(&sid("s1")).await.unwrap().stage(),
            Stage::MainMenu
        );
        assert_eq!(store.purge_expired().await.unwrap(), 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn purge_keeps_live_sessions() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        store.save(&SessionState::new(sid("a"))).await.unwrap();
        store.save(&SessionState::new(sid("b"))).await.unwrap();
        assert_eq!(store.purge_expired().await.unwrap(), 0);
        assert_eq!(store.len(), 2);
    }
}
