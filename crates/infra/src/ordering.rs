//! Single-request order placement, outside any USSD session.
//!
//! Checks run in a fixed order and the first failure wins:
//! required fields, pizza, quantity, toppings.

use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use pizzeria_core::{DomainError, PizzaId, ToppingId};
use pizzeria_orders::{MAX_QUANTITY, OrderReceipt, PendingOrder};
use pizzeria_ussd::{CatalogStore, OrderSink, StoreError};

/// Raw order fields as submitted. Zero counts as absent for `pizza_id` and
/// `quantity`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectOrderRequest {
    pub pizza_id: Option<i64>,
    pub quantity: Option<i64>,
    pub toppings: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderRequestError {
    #[error("Pizza ID and quantity are required")]
    MissingFields,
    #[error("Invalid pizza ID")]
    InvalidPizza,
    #[error("Invalid quantity")]
    InvalidQuantity,
    #[error("Toppings must be a list of IDs")]
    ToppingsNotList,
    #[error("Invalid topping ID")]
    InvalidTopping,
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OrderRequestError {
    pub fn code(&self) -> &'static str {
        match self {
            OrderRequestError::MissingFields => "missing_input",
            OrderRequestError::InvalidPizza
            | OrderRequestError::InvalidQuantity
            | OrderRequestError::ToppingsNotList
            | OrderRequestError::InvalidTopping => "validation_error",
            OrderRequestError::Domain(_) => "invariant_violation",
            OrderRequestError::Store(_) => "store_error",
        }
    }
}

#[derive(Clone)]
pub struct DirectOrderService {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderSink>,
}

impl DirectOrderService {
    pub fn new(catalog: Arc<dyn CatalogStore>, orders: Arc<dyn OrderSink>) -> Self {
        Self { catalog, orders }
    }

    #[instrument(skip(self, request), fields(pizza_id = ?request.pizza_id), err)]
    pub async fn place(&self, request: DirectOrderRequest) -> Result<OrderReceipt, OrderRequestError> {
        let (raw_pizza, raw_quantity) = match (request.pizza_id, request.quantity) {
            (Some(p), Some(q)) if p != 0 && q != 0 => (p, q),
            _ => return Err(OrderRequestError::MissingFields),
        };

        let pizza_id = PizzaId::new(raw_pizza).map_err(|_| OrderRequestError::InvalidPizza)?;
        let pizza = self
            .catalog
            .find_pizza(pizza_id)
            .await?
            .ok_or(OrderRequestError::InvalidPizza)?;

        let quantity = u32::try_from(raw_quantity)
            .ok()
            .filter(|q| (1..=MAX_QUANTITY).contains(q))
            .ok_or(OrderRequestError::InvalidQuantity)?;

        let wanted: BTreeSet<ToppingId> = request
            .toppings
            .iter()
            .map(|raw| ToppingId::new(*raw).map_err(|_| OrderRequestError::InvalidTopping))
            .collect::<Result<_, _>>()?;
        let ids: Vec<ToppingId> = wanted.into_iter().collect();
        let toppings = self.catalog.find_toppings(&ids).await?;
        if toppings.len() != ids.len() {
            return Err(OrderRequestError::InvalidTopping);
        }

        let receipt = self.orders.submit(PendingOrder::new(pizza, quantity, toppings)?).await?;
        info!(order_number = %receipt.order_number, total = %receipt.grand_total, "direct order placed");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemoryCatalog, InMemoryOrderSink};

    fn service() -> (DirectOrderService, Arc<InMemoryOrderSink>) {
        let catalog = Arc::new(InMemoryCatalog::seeded().unwrap());
        let sink = Arc::new(InMemoryOrderSink::new());
        (DirectOrderService::new(catalog, sink.clone()), sink)
    }

    fn request(pizza_id: Option<i64>, quantity: Option<i64>, toppings: &[i64]) -> DirectOrderRequest {
        DirectOrderRequest {
            pizza_id,
            quantity,
            toppings: toppings.to_vec(),
        }
    }

    #[tokio::test]
    async fn places_an_order_with_vat() {
        let (service, sink) = service();
        // Medium 10.00 + Cheese 3.00 + Olives 2.00 (ids 6, 7), two of them.
        let receipt = service.place(request(Some(2), Some(2), &[6, 7])).await.unwrap();

        assert_eq!(receipt.pizza, "Medium");
        assert_eq!(receipt.toppings, vec!["Cheese", "Olives"]);
        assert_eq!(receipt.subtotal.to_string(), "30.00");
        assert_eq!(receipt.vat.to_string(), "4.80");
        assert_eq!(receipt.grand_total.to_string(), "34.80");
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_topping_ids_count_once() {
        let (service, _) = service();
        let receipt = service.place(request(Some(1), Some(1), &[1, 1])).await.unwrap();
        assert_eq!(receipt.toppings, vec!["Cheese"]);
    }

    #[tokio::test]
    async fn validation_failures_are_reported_in_order() {
        let (service, sink) = service();

        let cases = [
            (request(None, Some(1), &[]), OrderRequestError::MissingFields),
            (request(Some(1), Some(0), &[]), OrderRequestError::MissingFields),
            (request(Some(99), Some(-1), &[]), OrderRequestError::InvalidPizza),
            (request(Some(-3), Some(1), &[]), OrderRequestError::InvalidPizza),
            (request(Some(1), Some(-1), &[]), OrderRequestError::InvalidQuantity),
            (request(Some(1), Some(i64::from(MAX_QUANTITY) + 1), &[]), OrderRequestError::InvalidQuantity),
            (request(Some(1), Some(i64::from(i32::MAX) + 1), &[]), OrderRequestError::InvalidQuantity),
            (request(Some(1), Some(1), &[1, 999]), OrderRequestError::InvalidTopping),
            (request(Some(1), Some(1), &[0]), OrderRequestError::InvalidTopping),
        ];

        for (req, expected) in cases {
            assert_eq!(service.place(req).await.unwrap_err(), expected);
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn messages_and_codes() {
        assert_eq!(
            OrderRequestError::MissingFields.to_string(),
            "Pizza ID and quantity are required"
        );
        assert_eq!(OrderRequestError::MissingFields.code(), "missing_input");
        assert_eq!(OrderRequestError::InvalidTopping.code(), "validation_error");
    }
}
