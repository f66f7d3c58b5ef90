//! Catalog domain module.
//!
//! Pizza and topping records as the ordering flow sees them: validated on
//! construction, immutable afterwards. No IO; stores live in `pizzeria-infra`.

pub mod pizza;
pub mod topping;

pub use pizza::{MAX_PIZZA_NAME_LEN, Pizza};
pub use topping::{MAX_TOPPING_NAME_LEN, Topping, ToppingCategory};
