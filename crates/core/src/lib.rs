//! `pizzeria-core` — shared domain building blocks.
//!
//! Identifiers, the fixed-point `Money` value object and the domain error type.
//! Nothing in here performs IO.

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{OrderNumber, PizzaId, SessionId, ToppingId};
pub use money::Money;
