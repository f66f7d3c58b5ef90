//! Menu texts sent back to the handset.

use std::fmt::Write as _;

use pizzeria_catalog::{Pizza, Topping};
use pizzeria_core::OrderNumber;
use pizzeria_orders::OrderTotals;

use crate::input::NO_TOPPINGS;

pub fn welcome() -> String {
    "Welcome to Pizza Palace\n1. Order pizza\n2. Exit".to_string()
}

pub fn farewell() -> String {
    "Thank you for visiting Pizza Palace. Goodbye!".to_string()
}

pub fn pizza_listing(pizzas: &[Pizza]) -> String {
    let mut out = String::from("Select pizza size:");
    for (i, pizza) in pizzas.iter().enumerate() {
        let _ = write!(out, "\n{}. {} - {}", i + 1, pizza.name(), pizza.price());
    }
    out
}

pub fn quantity_prompt(pizza_name: &str) -> String {
    format!("Enter quantity for {pizza_name}:")
}

pub fn topping_listing(toppings: &[Topping]) -> String {
    let mut out = String::from("Select toppings (comma-separated, e.g. 1,2):");
    let _ = write!(out, "\n{NO_TOPPINGS}. No toppings");
    for (i, topping) in toppings.iter().enumerate() {
        let _ = write!(out, "\n{}. {} - {}", i + 1, topping.name(), topping.price());
    }
    out
}

pub fn order_summary(pizza: &Pizza, quantity: u32, toppings: &[Topping], totals: &OrderTotals) -> String {
    let topping_names = if toppings.is_empty() {
        "None".to_string()
    } else {
        toppings.iter().map(Topping::name).collect::<Vec<_>>().join(", ")
    };

    format!(
        "Order summary:\nPizza: {} x{}\nToppings: {}\nSubtotal: {}\nVAT (16%): {}\nTotal: {}\n1. Confirm\n2. Cancel",
        pizza.name(),
        quantity,
        topping_names,
        totals.subtotal,
        totals.vat,
        totals.total,
    )
}

pub fn order_placed(order_number: &OrderNumber) -> String {
    format!("Order placed successfully. Order ID: {order_number}")
}

pub fn order_cancelled() -> String {
    "Order cancelled.".to_string()
}
