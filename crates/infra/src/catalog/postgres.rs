use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use pizzeria_catalog::{Pizza, Topping, ToppingCategory};
use pizzeria_core::{Money, PizzaId, ToppingId};
use pizzeria_ussd::{CatalogStore, StoreError};

use crate::postgres::{map_domain_error, map_sqlx_error};

/// Catalog backed by the `pizzas` and `toppings` tables.
#[derive(Debug, Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

struct PizzaRow {
    id: i64,
    name: String,
    price: Decimal,
}

impl<'r> sqlx::FromRow<'r, PgRow> for PizzaRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(PizzaRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
        })
    }
}

impl TryFrom<PizzaRow> for Pizza {
    type Error = StoreError;

    fn try_from(row: PizzaRow) -> Result<Self, Self::Error> {
        let id = PizzaId::new(row.id).map_err(map_domain_error)?;
        let price = Money::new(row.price).map_err(map_domain_error)?;
        Pizza::new(id, row.name, price).map_err(map_domain_error)
    }
}

struct ToppingRow {
    id: i64,
    pizza_id: i64,
    name: String,
    price: Decimal,
    category: String,
}

impl<'r> sqlx::FromRow<'r, PgRow> for ToppingRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ToppingRow {
            id: row.try_get("id")?,
            pizza_id: row.try_get("pizza_id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            category: row.try_get("category")?,
        })
    }
}

impl TryFrom<ToppingRow> for Topping {
    type Error = StoreError;

    fn try_from(row: ToppingRow) -> Result<Self, Self::Error> {
        let category: ToppingCategory = row.category.parse().map_err(map_domain_error)?;
        Topping::new(
            ToppingId::new(row.id).map_err(map_domain_error)?,
            PizzaId::new(row.pizza_id).map_err(map_domain_error)?,
            row.name,
            Money::new(row.price).map_err(map_domain_error)?,
            category,
        )
        .map_err(map_domain_error)
    }
}

fn convert<R, T>(rows: Vec<R>) -> Result<Vec<T>, StoreError>
where
    T: TryFrom<R, Error = StoreError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[async_trait]
impl CatalogStore for PostgresCatalog {
    #[instrument(skip(self), err)]
    async fn list_pizzas(&self) -> Result<Vec<Pizza>, StoreError> {
        let rows: Vec<PizzaRow> = sqlx::query_as("SELECT id, name, price FROM pizzas ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_pizzas", e))?;
        convert(rows)
    }

    #[instrument(skip(self), fields(pizza_id = %pizza), err)]
    async fn list_toppings(&self, pizza: PizzaId) -> Result<Vec<Topping>, StoreError> {
        let rows: Vec<ToppingRow> = sqlx::query_as(
            r#"
            SELECT id, pizza_id, name, price, category
            FROM toppings
            WHERE pizza_id = $1
            ORDER BY id
            "#,
        )
        .bind(pizza.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_toppings", e))?;
        convert(rows)
    }

    #[instrument(skip(self), fields(pizza_id = %id), err)]
    async fn find_pizza(&self, id: PizzaId) -> Result<Option<Pizza>, StoreError> {
        let row: Option<PizzaRow> = sqlx::query_as("SELECT id, name, price FROM pizzas WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_pizza", e))?;
        row.map(Pizza::try_from).transpose()
    }

    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    async fn find_toppings(&self, ids: &[ToppingId]) -> Result<Vec<Topping>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = ids.iter().map(ToppingId::get).collect();
        let rows: Vec<ToppingRow> = sqlx::query_as(
            r#"
            SELECT id, pizza_id, name, price, category
            FROM toppings
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(raw)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_toppings", e))?;
        convert(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topping_row(category: &str) -> ToppingRow {
        ToppingRow {
            id: 4,
            pizza_id: 1,
            name: "Pepperoni".to_string(),
            price: Decimal::new(400, 2),
            category: category.to_string(),
        }
    }

    #[test]
    fn rows_map_to_catalog_records() {
        let pizza = Pizza::try_from(PizzaRow {
            id: 2,
            name: "Medium".to_string(),
            price: Decimal::new(1000, 2),
        })
        .unwrap();
        assert_eq!(pizza.id().get(), 2);
        assert_eq!(pizza.price().to_string(), "10.00");

        let topping = Topping::try_from(topping_row("DELUXE")).unwrap();
        assert_eq!(topping.category(), ToppingCategory::Deluxe);
        assert_eq!(topping.pizza_id().get(), 1);
    }

    #[test]
    fn corrupt_rows_are_serialization_errors() {
        assert!(matches!(
            Topping::try_from(topping_row("premium")),
            Err(StoreError::Serialization(_))
        ));
        assert!(matches!(
            Pizza::try_from(PizzaRow {
                id: 0,
                name: "Small".to_string(),
                price: Decimal::new(800, 2),
            }),
            Err(StoreError::Serialization(_))
        ));
    }
}
