use serde::{Deserialize, Serialize};
use serde_json::Value;

use pizzeria_infra::{DirectOrderRequest, OrderRequestError};

// -------------------------
// Request DTOs
// -------------------------

/// One USSD hop as posted by the gateway.
#[derive(Debug, Deserialize)]
pub struct UssdRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub selection: Option<String>,
}

/// Direct order body. Fields stay loosely typed so that each kind of bad
/// input gets its own message instead of a generic JSON rejection.
#[derive(Debug, Default, Deserialize)]
pub struct DirectOrderBody {
    #[serde(default)]
    pub pizza_id: Value,
    #[serde(default)]
    pub quantity: Value,
    #[serde(default)]
    pub toppings: Value,
}

impl DirectOrderBody {
    pub fn into_request(self) -> Result<DirectOrderRequest, OrderRequestError> {
        if !is_present(&self.pizza_id) || !is_present(&self.quantity) {
            return Err(OrderRequestError::MissingFields);
        }

        let pizza_id = as_int(&self.pizza_id).ok_or(OrderRequestError::InvalidPizza)?;
        let quantity = as_int(&self.quantity).ok_or(OrderRequestError::InvalidQuantity)?;

        let toppings = match self.toppings {
            Value::Array(items) => items
                .iter()
                .map(|v| as_int(v).ok_or(OrderRequestError::InvalidTopping))
                .collect::<Result<Vec<_>, _>>()?,
            other if !is_present(&other) => Vec::new(),
            _ => return Err(OrderRequestError::ToppingsNotList),
        };

        Ok(DirectOrderRequest {
            pizza_id: Some(pizza_id),
            quantity: Some(quantity),
            toppings,
        })
    }
}

/// Null, zero, empty string and `false` all count as not supplied.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Integer from a JSON integer or a numeric string.
fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct UssdResponse {
    pub menu: String,
}
