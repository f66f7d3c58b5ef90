//! Fixed-point currency amounts.
//!
//! All prices and totals are decimals with exactly two fractional digits.
//! Amounts never go negative; there are no refunds or discounts in this domain.

use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Non-negative currency amount with two decimal places.
///
/// Serialises as a string (`"34.80"`) so no precision is lost in JSON.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "String")]
pub struct Money(Decimal);

impl Money {
    /// Number of fractional digits carried by every amount.
    pub const SCALE: u32 = 2;

    /// Build an amount, rejecting negatives and sub-cent precision.
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation(format!(
                "amount must not be negative: {amount}"
            )));
        }
        if amount.round_dp(Self::SCALE) != amount {
            return Err(DomainError::validation(format!(
                "amount has more than {} decimal places: {amount}",
                Self::SCALE
            )));
        }
        Ok(Self::normalized(amount))
    }

    /// Amount from a whole number of cents (`1050` -> `10.50`).
    pub fn from_cents(cents: u64) -> Self {
        Self::normalized(Decimal::from(cents) / Decimal::ONE_HUNDRED)
    }

    pub fn zero() -> Self {
        Self::normalized(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a unit count.
    pub fn times(&self, quantity: u32) -> Self {
        Self::normalized(self.0 * Decimal::from(quantity))
    }

    /// Apply a rate (e.g. `0.16`) and round back to cents using banker's rounding.
    pub fn apply_rate(&self, rate: Decimal) -> Self {
        Self::normalized((self.0 * rate).round_dp(Self::SCALE))
    }

    fn normalized(mut amount: Decimal) -> Self {
        amount.rescale(Self::SCALE);
        Self(amount)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::normalized(self.0 + rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::validation(format!("invalid amount {s:?}: {e}")))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn display_always_has_two_decimals() {
        assert_eq!(Money::from_cents(1000).to_string(), "10.00");
        assert_eq!("4.8".parse::<Money>().unwrap().to_string(), "4.80");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn rejects_negative_and_sub_cent_amounts() {
        assert!("-1.00".parse::<Money>().is_err());
        assert!("1.005".parse::<Money>().is_err());
        assert!("not money".parse::<Money>().is_err());
    }

    #[test]
    fn apply_rate_rounds_to_cents() {
        let subtotal: Money = "30.00".parse().unwrap();
        let vat = subtotal.apply_rate(Decimal::new(16, 2));
        assert_eq!(vat.to_string(), "4.80");

        // 0.16 * 0.10 = 0.016 -> 0.02
        let vat = Money::from_cents(10).apply_rate(Decimal::new(16, 2));
        assert_eq!(vat, Money::from_cents(2));
    }

    #[test]
    fn serde_uses_fixed_point_strings() {
        let m = Money::from_cents(3480);
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"34.80\"");
        let back: Money = serde_json::from_str("\"34.80\"").unwrap();
        assert_eq!(back, m);
        assert!(serde_json::from_str::<Money>("\"-2.00\"").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: cent arithmetic through `Money` matches plain integer arithmetic.
        #[test]
        fn addition_and_multiplication_match_cents(
            a in 0u64..1_000_000u64,
            b in 0u64..1_000_000u64,
            qty in 1u32..1_000u32,
        ) {
            let sum = Money::from_cents(a) + Money::from_cents(b);
            prop_assert_eq!(sum, Money::from_cents(a + b));

            let scaled = Money::from_cents(a).times(qty);
            prop_assert_eq!(scaled, Money::from_cents(a * qty as u64));
        }
    }
}
