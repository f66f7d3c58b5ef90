//! Collaborators the machine talks to.
//!
//! Implementations live in `pizzeria-infra` (in-memory, Postgres, Redis).
//! Missing records are reported as `None` or as absent entries, never as errors;
//! `StoreError` is reserved for backend failures.

use async_trait::async_trait;
use thiserror::Error;

use pizzeria_catalog::{Pizza, Topping};
use pizzeria_core::{PizzaId, SessionId, ToppingId};
use pizzeria_orders::{OrderReceipt, PendingOrder};

use crate::session::SessionState;

/// Backend failure in one of the collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn backend(err: impl core::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }

    pub fn serialization(err: impl core::fmt::Display) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Read-only pizza and topping records.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All pizzas, ordered by id.
    async fn list_pizzas(&self) -> Result<Vec<Pizza>, StoreError>;

    /// Toppings owned by `pizza`, ordered by id.
    async fn list_toppings(&self, pizza: PizzaId) -> Result<Vec<Topping>, StoreError>;

    async fn find_pizza(&self, id: PizzaId) -> Result<Option<Pizza>, StoreError>;

    /// Toppings with the given ids, ordered by id. Unknown ids are skipped.
    async fn find_toppings(&self, ids: &[ToppingId]) -> Result<Vec<Topping>, StoreError>;
}

/// Session persistence keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionState>, StoreError>;

    /// Insert or overwrite. Refreshes the session's lifetime.
    async fn save(&self, state: &SessionState) -> Result<(), StoreError>;

    /// Remove the session. Deleting an unknown id is not an error.
    async fn delete(&self, id: &SessionId) -> Result<(), StoreError>;

    /// Stored state, or a fresh MAIN_MENU session if none exists.
    ///
    /// The fresh session is not persisted until the caller saves it.
    async fn get_or_init(&self, id: &SessionId) -> Result<SessionState, StoreError> {
        Ok(self
            .load(id)
            .await?
            .unwrap_or_else(|| SessionState::new(id.clone())))
    }

    /// Drop expired sessions; returns how many were removed.
    /// Backends with native expiry keep the default.
    async fn purge_expired(&self) -> Result<usize, StoreError> {
        Ok(0)
    }
}

/// Accepts finished orders.
#[async_trait]
pub trait OrderSink: Send + Sync {
    async fn submit(&self, order: PendingOrder) -> Result<OrderReceipt, StoreError>;
}
