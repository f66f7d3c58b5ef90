use serde::{Deserialize, Serialize};

use pizzeria_catalog::{Pizza, Topping};
use pizzeria_core::{DomainError, Money, OrderNumber};

use crate::pricing::OrderTotals;

/// A finished selection handed to an order sink. Never stored by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    pizza: Pizza,
    quantity: u32,
    toppings: Vec<Topping>,
    totals: OrderTotals,
}

impl PendingOrder {
    pub fn new(pizza: Pizza, quantity: u32, toppings: Vec<Topping>) -> Result<Self, DomainError> {
        let totals = OrderTotals::compute(pizza.price(), toppings.iter().map(Topping::price), quantity)?;
        Ok(Self {
            pizza,
            quantity,
            toppings,
            totals,
        })
    }

    pub fn pizza(&self) -> &Pizza {
        &self.pizza
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn toppings(&self) -> &[Topping] {
        &self.toppings
    }

    pub fn totals(&self) -> OrderTotals {
        self.totals
    }

    /// Receipt for this order once a sink has assigned its number.
    pub fn receipt(&self, order_number: OrderNumber) -> OrderReceipt {
        let totals = self.totals;
        OrderReceipt {
            order_number,
            pizza: self.pizza.name().to_string(),
            quantity: self.quantity,
            toppings: self.toppings.iter().map(|t| t.name().to_string()).collect(),
            subtotal: totals.subtotal,
            vat: totals.vat,
            grand_total: totals.total,
        }
    }
}

/// What the customer gets back after an order is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    #[serde(rename = "order_id")]
    pub order_number: OrderNumber,
    pub pizza: String,
    pub quantity: u32,
    pub toppings: Vec<String>,
    pub subtotal: Money,
    pub vat: Money,
    pub grand_total: Money,
}
