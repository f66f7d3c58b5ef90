//! Postgres wiring shared by the catalog and order adapters.
//!
//! ## Error Mapping
//!
//! | SQLx Error            | StoreError      |
//! |-----------------------|-----------------|
//! | Database / Io / Pool  | `Backend`       |
//! | Decode / ColumnDecode | `Serialization` |
//!
//! Rows that decode but fail domain validation (e.g. an empty pizza name)
//! are also reported as `Serialization`.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use pizzeria_core::DomainError;
use pizzeria_ussd::StoreError;

use crate::seed;

const SCHEMA: &str = include_str!("../migrations/0001_pizzeria.sql");

/// Open a pool and make sure the schema exists.
#[instrument(skip(database_url), err)]
pub async fn connect(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))?;

    sqlx::raw_sql(SCHEMA)
        .execute(&pool)
        .await
        .map_err(|e| map_sqlx_error("apply_schema", e))?;

    info!("postgres schema ready");
    Ok(pool)
}

/// Insert the default menu when the catalog tables are empty.
#[instrument(skip(pool), err)]
pub async fn seed_if_empty(pool: &PgPool) -> Result<bool, StoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pizzas")
        .fetch_one(pool)
        .await
        .map_err(|e| map_sqlx_error("count_pizzas", e))?;
    if count > 0 {
        return Ok(false);
    }

    let (pizzas, toppings) = seed::default_menu().map_err(map_domain_error)?;
    let mut tx = pool.begin().await.map_err(|e| map_sqlx_error("begin", e))?;

    for pizza in &pizzas {
        sqlx::query("INSERT INTO pizzas (id, name, price) VALUES ($1, $2, $3)")
            .bind(pizza.id().get())
            .bind(pizza.name())
            .bind(pizza.price().amount())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("seed_pizza", e))?;
    }
    for topping in &toppings {
        sqlx::query(
            "INSERT INTO toppings (id, pizza_id, name, price, category) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(topping.id().get())
        .bind(topping.pizza_id().get())
        .bind(topping.name())
        .bind(topping.price().amount())
        .bind(topping.category().as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("seed_topping", e))?;
    }

    // Explicit ids above leave the serial sequences behind.
    for table in ["pizzas", "toppings"] {
        sqlx::query(&format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), (SELECT MAX(id) FROM {table}))"
        ))
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("seed_sequence", e))?;
    }

    tx.commit().await.map_err(|e| map_sqlx_error("commit", e))?;
    info!(pizzas = pizzas.len(), toppings = toppings.len(), "seeded default menu");
    Ok(true)
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::serialization(format!("{operation}: {err}"))
        }
        other => {
            warn!(operation, error = %other, "postgres operation failed");
            StoreError::backend(format!("{operation}: {other}"))
        }
    }
}

pub(crate) fn map_domain_error(err: DomainError) -> StoreError {
    StoreError::serialization(format!("invalid stored record: {err}"))
}
