//! `CatalogStore` implementations.

mod in_memory;
mod postgres;

pub use in_memory::InMemoryCatalog;
pub use postgres::PostgresCatalog;
