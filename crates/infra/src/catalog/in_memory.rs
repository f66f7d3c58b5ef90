use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use pizzeria_catalog::{Pizza, Topping};
use pizzeria_core::{DomainResult, PizzaId, ToppingId};
use pizzeria_ussd::{CatalogStore, StoreError};

use crate::seed;

/// In-memory catalog for tests/dev. Records are kept ordered by id.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    pizzas: RwLock<BTreeMap<PizzaId, Pizza>>,
    toppings: RwLock<BTreeMap<ToppingId, Topping>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-filled with the default menu.
    pub fn seeded() -> DomainResult<Self> {
        let (pizzas, toppings) = seed::default_menu()?;
        let catalog = Self::new();
        for pizza in pizzas {
            catalog.upsert_pizza(pizza);
        }
        for topping in toppings {
            catalog.upsert_topping(topping);
        }
        Ok(catalog)
    }

    pub fn upsert_pizza(&self, pizza: Pizza) {
        if let Ok(mut map) = self.pizzas.write() {
            map.insert(pizza.id(), pizza);
        }
    }

    pub fn upsert_topping(&self, topping: Topping) {
        if let Ok(mut map) = self.toppings.write() {
            map.insert(topping.id(), topping);
        }
    }

    /// Remove a pizza and the toppings it owns.
    pub fn remove_pizza(&self, id: PizzaId) {
        if let Ok(mut map) = self.pizzas.write() {
            map.remove(&id);
        }
        if let Ok(mut map) = self.toppings.write() {
            map.retain(|_, t| t.pizza_id() != id);
        }
    }

    pub fn remove_topping(&self, id: ToppingId) {
        if let Ok(mut map) = self.toppings.write() {
            map.remove(&id);
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::backend("catalog lock poisoned")
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_pizzas(&self) -> Result<Vec<Pizza>, StoreError> {
        let map = self.pizzas.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }

    async fn list_toppings(&self, pizza: PizzaId) -> Result<Vec<Topping>, StoreError> {
        let map = self.toppings.read().map_err(|_| poisoned())?;
        Ok(map.values().filter(|t| t.pizza_id() == pizza).cloned().collect())
    }

    async fn find_pizza(&self, id: PizzaId) -> Result<Option<Pizza>, StoreError> {
        let map = self.pizzas.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    async fn find_toppings(&self, ids: &[ToppingId]) -> Result<Vec<Topping>, StoreError> {
        let map = self.toppings.read().map_err(|_| poisoned())?;
        let mut found: Vec<Topping> = ids.iter().filter_map(|id| map.get(id).cloned()).collect();
        found.sort_by_key(Topping::id);
        found.dedup_by_key(|t| t.id());
        Ok(found)
    }
}
