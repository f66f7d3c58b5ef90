//! Order pricing.
//!
//! ```text
//! subtotal = quantity × (pizza price + Σ topping prices)
//! vat      = round(subtotal × 0.16, 2)
//! total    = subtotal + vat
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pizzeria_core::{DomainError, Money};

/// Flat VAT rate applied once to the subtotal.
pub const VAT_RATE: Decimal = Decimal::from_parts(16, 0, 0, false, 2);

/// Most units of one pizza a single order may carry.
pub const MAX_QUANTITY: u32 = 100;

/// Computed totals for a single order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub vat: Money,
    pub total: Money,
}

impl OrderTotals {
    pub fn compute<I>(base: Money, toppings: I, quantity: u32) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = Money>,
    {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if quantity > MAX_QUANTITY {
            return Err(DomainError::validation(format!(
                "quantity must be at most {MAX_QUANTITY}"
            )));
        }

        let unit = base + toppings.into_iter().sum::<Money>();
        let subtotal = unit.times(quantity);
        let vat = subtotal.apply_rate(VAT_RATE);

        Ok(Self {
            subtotal,
            vat,
            total: subtotal + vat,
        })
    }
}
