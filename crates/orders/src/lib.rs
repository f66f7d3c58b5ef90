//! Orders domain module.
//!
//! Pricing rules and the order shapes exchanged with an order sink. Pure
//! logic only; persistence of orders lives in `pizzeria-infra`.

pub mod number;
pub mod order;
pub mod pricing;

pub use number::OrderNumberGenerator;
pub use order::{OrderReceipt, PendingOrder};
pub use pricing::{MAX_QUANTITY, OrderTotals, VAT_RATE};
