//! `OrderSink` implementations.

mod in_memory;
mod postgres;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pizzeria_core::{OrderNumber, PizzaId, ToppingId};
use pizzeria_orders::{OrderTotals, PendingOrder};

pub use in_memory::InMemoryOrderSink;
pub use postgres::PostgresOrderSink;

/// Orders are stored unpaid; payment collection is outside this service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
        }
    }
}

/// An accepted order as a sink records it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredOrder {
    pub order_number: OrderNumber,
    pub pizza_id: PizzaId,
    pub quantity: u32,
    pub topping_ids: Vec<ToppingId>,
    pub totals: OrderTotals,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl StoredOrder {
    fn from_pending(order: &PendingOrder, order_number: OrderNumber, created_at: DateTime<Utc>) -> Self {
        Self {
            order_number,
            pizza_id: order.pizza().id(),
            quantity: order.quantity(),
            topping_ids: order.toppings().iter().map(|t| t.id()).collect(),
            totals: order.totals(),
            payment_status: PaymentStatus::default(),
            created_at,
        }
    }
}
