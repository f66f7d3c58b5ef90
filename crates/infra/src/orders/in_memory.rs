use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use pizzeria_orders::{OrderNumberGenerator, OrderReceipt, PendingOrder};
use pizzeria_ussd::{OrderSink, StoreError};

use super::StoredOrder;

/// In-memory order sink for tests/dev. Keeps every accepted order.
#[derive(Debug, Default)]
pub struct InMemoryOrderSink {
    numbers: OrderNumberGenerator,
    orders: RwLock<Vec<StoredOrder>>,
}

impl InMemoryOrderSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted orders, oldest first.
    pub fn orders(&self) -> Vec<StoredOrder> {
        self.orders.read().map(|o| o.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.orders.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderSink for InMemoryOrderSink {
    async fn submit(&self, order: PendingOrder) -> Result<OrderReceipt, StoreError> {
        let now = Utc::now();
        let number = self.numbers.next(now);
        let stored = StoredOrder::from_pending(&order, number.clone(), now);

        self.orders
            .write()
            .map_err(|_| StoreError::backend("order lock poisoned"))?
            .push(stored);

        Ok(order.receipt(number))
    }
}
