//! Per-session state carried between requests.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use pizzeria_core::{DomainError, DomainResult, PizzaId, SessionId, ToppingId};

use crate::stage::Stage;

/// Pizza chosen at SELECT_SIZE. The name is kept for prompts; the price is
/// always re-read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPizza {
    pub id: PizzaId,
    pub name: String,
}

/// Selections accumulated so far.
///
/// Fields fill strictly in order: pizza, then quantity, then toppings. The
/// setters refuse anything else so a stage can never write a field it does
/// not own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pizza: Option<SelectedPizza>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    toppings: Option<BTreeSet<ToppingId>>,
}

impl SessionContext {
    pub fn pizza(&self) -> Option<&SelectedPizza> {
        self.pizza.as_ref()
    }

    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    pub fn toppings(&self) -> Option<&BTreeSet<ToppingId>> {
        self.toppings.as_ref()
    }

    pub fn select_pizza(&mut self, pizza: SelectedPizza) -> DomainResult<()> {
        if self.quantity.is_some() || self.toppings.is_some() {
            return Err(DomainError::invariant(
                "pizza can only be chosen before quantity and toppings",
            ));
        }
        self.pizza = Some(pizza);
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: u32) -> DomainResult<()> {
        if self.pizza.is_none() {
            return Err(DomainError::invariant("quantity set before a pizza was chosen"));
        }
        if self.toppings.is_some() {
            return Err(DomainError::invariant("quantity set after toppings were chosen"));
        }
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        self.quantity = Some(quantity);
        Ok(())
    }

    pub fn set_toppings(&mut self, toppings: BTreeSet<ToppingId>) -> DomainResult<()> {
        if self.quantity.is_none() {
            return Err(DomainError::invariant("toppings set before a quantity was chosen"));
        }
        self.toppings = Some(toppings);
        Ok(())
    }

    /// Pizza and quantity, or an invariant error if the session skipped a stage.
    pub fn require_pizza_and_quantity(&self) -> DomainResult<(&SelectedPizza, u32)> {
        let pizza = self
            .pizza
            .as_ref()
            .ok_or_else(|| DomainError::invariant("session has no pizza selected"))?;
        let quantity = self
            .quantity
            .ok_or_else(|| DomainError::invariant("session has no quantity selected"))?;
        Ok((pizza, quantity))
    }
}

/// Stored state of one USSD session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    session_id: SessionId,
    stage: Stage,
    #[serde(default)]
    context: SessionContext,
}

impl SessionState {
    /// Fresh session at MAIN_MENU with nothing selected.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            stage: Stage::MainMenu,
            context: SessionContext::default(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut SessionContext {
        &mut self.context
    }

    /// Move to the next stage. Only the immediate successor is allowed.
    pub fn advance(&mut self) -> DomainResult<Stage> {
        let next = self.stage.successor().ok_or_else(|| {
            DomainError::invariant(format!("{} has no successor stage", self.stage))
        })?;
        self.stage = next;
        Ok(next)
    }
}
