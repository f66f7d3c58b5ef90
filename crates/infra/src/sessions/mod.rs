//! `SessionStore` implementations.

mod in_memory;
#[cfg(feature = "redis")]
mod redis;

pub use in_memory::InMemorySessionStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisSessionStore;
