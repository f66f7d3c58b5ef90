use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument};

use pizzeria_orders::{OrderNumberGenerator, OrderReceipt, PendingOrder};
use pizzeria_ussd::{OrderSink, StoreError};

use super::StoredOrder;
use crate::postgres::map_sqlx_error;

/// Writes each order as one `orders` row, one `order_items` row and its
/// topping links, in a single transaction.
#[derive(Debug)]
pub struct PostgresOrderSink {
    pool: PgPool,
    numbers: OrderNumberGenerator,
}

impl PostgresOrderSink {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            numbers: OrderNumberGenerator::new(),
        }
    }
}

#[async_trait]
impl OrderSink for PostgresOrderSink {
    #[instrument(skip(self, order), fields(pizza_id = %order.pizza().id()), err)]
    async fn submit(&self, order: PendingOrder) -> Result<OrderReceipt, StoreError> {
        let now = Utc::now();
        let stored = StoredOrder::from_pending(&order, self.numbers.next(now), now);
        let quantity = i32::try_from(stored.quantity)
            .map_err(|_| StoreError::backend("quantity exceeds column range"))?;

        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error("begin", e))?;

        let order_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (order_number, subtotal, vat, total, payment_status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(stored.order_number.as_str())
        .bind(stored.totals.subtotal.amount())
        .bind(stored.totals.vat.amount())
        .bind(stored.totals.total.amount())
        .bind(stored.payment_status.as_str())
        .bind(stored.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_order", e))?;

        let item_id: i64 = sqlx::query_scalar(
            "INSERT INTO order_items (order_id, pizza_id, quantity) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(order_id)
        .bind(stored.pizza_id.get())
        .bind(quantity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_order_item", e))?;

        for topping in &stored.topping_ids {
            sqlx::query("INSERT INTO order_item_toppings (order_item_id, topping_id) VALUES ($1, $2)")
                .bind(item_id)
                .bind(topping.get())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("insert_order_topping", e))?;
        }

        tx.commit().await.map_err(|e| map_sqlx_error("commit", e))?;

        info!(order_number = %stored.order_number, order_id, "order persisted");
        Ok(order.receipt(stored.order_number))
    }
}
