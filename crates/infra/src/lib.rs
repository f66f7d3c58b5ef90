//! Infrastructure layer: stores, configuration, seed data and order placement.

pub mod catalog;
pub mod config;
pub mod ordering;
pub mod orders;
pub mod postgres;
pub mod seed;
pub mod sessions;


pub use catalog::{InMemoryCatalog, PostgresCatalog};
pub use config::{AppConfig, ConfigError, LogFormat};
pub use ordering::{DirectOrderRequest, DirectOrderService, OrderRequestError};
pub use orders::{InMemoryOrderSink, PaymentStatus, PostgresOrderSink, StoredOrder};
pub use sessions::InMemorySessionStore;

#[cfg(feature = "redis")]
pub use sessions::RedisSessionStore;
