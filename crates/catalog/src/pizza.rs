use serde::{Deserialize, Serialize};

use pizzeria_core::{DomainError, Money, PizzaId};

/// Longest pizza name the catalog accepts.
pub const MAX_PIZZA_NAME_LEN: usize = 20;

/// A pizza on the menu. The name doubles as the size label ("Small", "Large").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pizza {
    id: PizzaId,
    name: String,
    price: Money,
}

impl Pizza {
    pub fn new(id: PizzaId, name: impl Into<String>, price: Money) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("pizza name must not be empty"));
        }
        if name.chars().count() > MAX_PIZZA_NAME_LEN {
            return Err(DomainError::validation(format!(
                "pizza name must be at most {MAX_PIZZA_NAME_LEN} characters"
            )));
        }
        Ok(Self { id, name, price })
    }

    pub fn id(&self) -> PizzaId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(n: i64) -> PizzaId {
        PizzaId::new(n).unwrap()
    }

    #[test]
    fn new_trims_and_keeps_fields() {
        let p = Pizza::new(pid(1), "  Medium ", Money::from_cents(1000)).unwrap();
        assert_eq!(p.name(), "Medium");
        assert_eq!(p.price().to_string(), "10.00");
        assert_eq!(p.id(), pid(1));
    }

    #[test]
    fn name_is_required_and_bounded() {
        assert!(matches!(
            Pizza::new(pid(1), "  ", Money::zero()),
            Err(DomainError::Validation(_))
        ));
        let long = "x".repeat(MAX_PIZZA_NAME_LEN + 1);
        assert!(Pizza::new(pid(1), long, Money::zero()).is_err());
        let exact = "x".repeat(MAX_PIZZA_NAME_LEN);
        assert!(Pizza::new(pid(1), exact, Money::zero()).is_ok());
    }
}
