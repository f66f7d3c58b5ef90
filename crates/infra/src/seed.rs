//! Default menu for development and in-memory deployments.

use pizzeria_catalog::{Pizza, Topping, ToppingCategory};
use pizzeria_core::{DomainResult, Money, PizzaId, ToppingId};

const PIZZAS: &[(i64, &str, u64)] = &[(1, "Small", 800), (2, "Medium", 1000), (3, "Large", 1400)];

const TOPPINGS: &[(&str, u64, ToppingCategory)] = &[
    ("Cheese", 300, ToppingCategory::Basic),
    ("Olives", 200, ToppingCategory::Basic),
    ("Mushrooms", 250, ToppingCategory::Basic),
    ("Pepperoni", 400, ToppingCategory::Deluxe),
    ("Chicken", 450, ToppingCategory::Deluxe),
];

/// Three sizes, each with the same five toppings. Topping prices do not vary by size.
pub fn default_menu() -> DomainResult<(Vec<Pizza>, Vec<Topping>)> {
    let mut pizzas = Vec::with_capacity(PIZZAS.len());
    let mut toppings = Vec::with_capacity(PIZZAS.len() * TOPPINGS.len());
    let mut next_topping = 1;

    for &(id, name, cents) in PIZZAS {
        let pizza_id = PizzaId::new(id)?;
        pizzas.push(Pizza::new(pizza_id, name, Money::from_cents(cents))?);

        for &(topping, cents, category) in TOPPINGS {
            toppings.push(Topping::new(
                ToppingId::new(next_topping)?,
                pizza_id,
                topping,
                Money::from_cents(cents),
                category,
            )?);
            next_topping += 1;
        }
    }

    Ok((pizzas, toppings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pizza_gets_its_own_toppings() {
        let (pizzas, toppings) = default_menu().unwrap();
        assert_eq!(pizzas.len(), 3);
        assert_eq!(toppings.len(), 15);

        for pizza in &pizzas {
            let owned = toppings
                .iter()
                .filter(|t| t.pizza_id() == pizza.id())
                .count();
            assert_eq!(owned, TOPPINGS.len());
        }
    }

    #[test]
    fn topping_ids_are_unique_and_ascending() {
        let (_, toppings) = default_menu().unwrap();
        let ids: Vec<i64> = toppings.iter().map(|t| t.id().get()).collect();
        let expected: Vec<i64> = (1..=15).collect();
        assert_eq!(ids, expected);
    }
}
