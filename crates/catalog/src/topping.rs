use core::str::FromStr;

use serde::{Deserialize, Serialize};

use pizzeria_core::{DomainError, Money, PizzaId, ToppingId};

/// Longest topping name the catalog accepts.
pub const MAX_TOPPING_NAME_LEN: usize = 50;

/// Topping tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToppingCategory {
    Basic,
    Deluxe,
}

impl ToppingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToppingCategory::Basic => "basic",
            ToppingCategory::Deluxe => "deluxe",
        }
    }
}

impl FromStr for ToppingCategory {
    type Err = DomainError;

    /// Case-insensitive (`"Deluxe"` and `"deluxe"` are the same category).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(ToppingCategory::Basic),
            "deluxe" => Ok(ToppingCategory::Deluxe),
            other => Err(DomainError::validation(format!(
                "unknown topping category: {other}"
            ))),
        }
    }
}

/// A topping offered for one pizza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topping {
    id: ToppingId,
    pizza_id: PizzaId,
    name: String,
    price: Money,
    category: ToppingCategory,
}

impl Topping {
    pub fn new(
        id: ToppingId,
        pizza_id: PizzaId,
        name: impl Into<String>,
        price: Money,
        category: ToppingCategory,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("topping name must not be empty"));
        }
        if name.chars().count() > MAX_TOPPING_NAME_LEN {
            return Err(DomainError::validation(format!(
                "topping name must be at most {MAX_TOPPING_NAME_LEN} characters"
            )));
        }
        Ok(Self {
            id,
            pizza_id,
            name,
            price,
            category,
        })
    }

    pub fn id(&self) -> ToppingId {
        self.id
    }

    pub fn pizza_id(&self) -> PizzaId {
        self.pizza_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category(&self) -> ToppingCategory {
        self.category
    }
}
