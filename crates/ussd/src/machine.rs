//! Request handling for one USSD hop.
//!
//! ```text
//! (session_id, selection)
//!   ↓
//! 1. Load session (get-or-init: unknown ids start at MAIN_MENU)
//!   ↓
//! 2. Validate selection against the current stage, read the catalog
//!   ↓
//! 3a. Accepted, more to ask  → save session, return next menu
//! 3b. Terminal (exit, cancel, confirm) → submit order if confirmed,
//!     delete session, return closing text
//! ```
//!
//! Once an order is submitted the reply is always a success. If the session
//! cannot be deleted it is reset to MAIN_MENU instead, so a resent "1" can
//! never submit the same order twice.
//!
//! A rejected selection returns before anything is written, so the stored
//! stage is unchanged and the client can simply resend.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use pizzeria_catalog::{Pizza, Topping};
use pizzeria_core::{DomainError, SessionId, ToppingId};
use pizzeria_orders::{OrderTotals, PendingOrder};

use crate::error::{Rejection, UssdError};
use crate::input;
use crate::menu;
use crate::ports::{CatalogStore, OrderSink, SessionStore};
use crate::session::{SelectedPizza, SessionState};
use crate::stage::Stage;

/// Text returned to the handset for one hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UssdReply {
    pub menu: String,
    /// The session was closed (exit, cancellation or committed order).
    pub ended: bool,
}

enum Step {
    Continue(String),
    End(String),
    /// An order was submitted; closing must not fail the request.
    Committed(String),
}

/// Drives sessions through the ordering menus.
#[derive(Clone)]
pub struct UssdMachine {
    catalog: Arc<dyn CatalogStore>,
    sessions: Arc<dyn SessionStore>,
    orders: Arc<dyn OrderSink>,
}

impl UssdMachine {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        sessions: Arc<dyn SessionStore>,
        orders: Arc<dyn OrderSink>,
    ) -> Self {
        Self {
            catalog,
            sessions,
            orders,
        }
    }

    /// Handle one request. `session_id` is the raw value from the gateway.
    pub async fn handle(
        &self,
        session_id: Option<&str>,
        selection: &str,
    ) -> Result<UssdReply, UssdError> {
        let session_id = parse_session_id(session_id)?;
        self.handle_session(&session_id, selection).await
    }

    #[instrument(skip(self, session_id, selection), fields(session_id = %session_id))]
    pub async fn handle_session(
        &self,
        session_id: &SessionId,
        selection: &str,
    ) -> Result<UssdReply, UssdError> {
        let mut session = self.sessions.get_or_init(session_id).await?;
        let from = session.stage();

        let step = match self.step(&mut session, selection.trim()).await {
            Ok(step) => step,
            Err(err) => {
                debug!(stage = %from, error = %err, "selection rejected");
                return Err(err);
            }
        };

        match step {
            Step::Continue(menu) => {
                self.sessions.save(&session).await?;
                debug!(from = %from, to = %session.stage(), "session advanced");
                Ok(UssdReply { menu, ended: false })
            }
            Step::End(menu) => {
                self.sessions.delete(session_id).await?;
                debug!(from = %from, "session closed");
                Ok(UssdReply { menu, ended: true })
            }
            Step::Committed(menu) => {
                self.close_committed(session_id).await;
                debug!(from = %from, "session closed");
                Ok(UssdReply { menu, ended: true })
            }
        }
    }

    async fn close_committed(&self, session_id: &SessionId) {
        let Err(err) = self.sessions.delete(session_id).await else {
            return;
        };
        warn!(error = %err, "could not delete session after order, resetting it");
        if let Err(err) = self.sessions.save(&SessionState::new(session_id.clone())).await {
            warn!(error = %err, "could not reset session after order");
        }
    }

    async fn step(&self, session: &mut SessionState, selection: &str) -> Result<Step, UssdError> {
        match session.stage() {
            Stage::MainMenu => {
                session.advance()?;
                Ok(Step::Continue(menu::welcome()))
            }

            Stage::MainMenuSelection => match selection {
                "1" => {
                    let pizzas = self.catalog.list_pizzas().await?;
                    session.advance()?;
                    Ok(Step::Continue(menu::pizza_listing(&pizzas)))
                }
                "2" => Ok(Step::End(menu::farewell())),
                _ => Err(Rejection::MenuSelection.into()),
            },

            Stage::SelectSize => {
                let pizzas = self.catalog.list_pizzas().await?;
                let index = input::listing_index(selection, pizzas.len())
                    .ok_or(Rejection::PizzaSelection)?;
                let pizza = &pizzas[index];

                session.context_mut().select_pizza(SelectedPizza {
                    id: pizza.id(),
                    name: pizza.name().to_string(),
                })?;
                session.advance()?;
                Ok(Step::Continue(menu::quantity_prompt(pizza.name())))
            }

            Stage::SelectQuantity => {
                let quantity = input::quantity(selection).ok_or(Rejection::Quantity)?;
                let pizza_id = session
                    .context()
                    .pizza()
                    .map(|p| p.id)
                    .ok_or_else(|| DomainError::invariant("session has no pizza selected"))?;
                let toppings = self.catalog.list_toppings(pizza_id).await?;

                session.context_mut().set_quantity(quantity)?;
                session.advance()?;
                Ok(Step::Continue(menu::topping_listing(&toppings)))
            }

            Stage::SelectToppings => {
                let (selected, quantity) = {
                    let (pizza, quantity) = session.context().require_pizza_and_quantity()?;
                    (pizza.clone(), quantity)
                };
                let listing = self.catalog.list_toppings(selected.id).await?;
                let indices = input::topping_indices(selection, listing.len())
                    .ok_or(Rejection::ToppingSelection)?;
                let chosen: Vec<Topping> = indices.into_iter().map(|i| listing[i].clone()).collect();

                let pizza = self.resolve_pizza(&selected).await?;
                let totals =
                    OrderTotals::compute(pizza.price(), chosen.iter().map(Topping::price), quantity)?;

                session
                    .context_mut()
                    .set_toppings(chosen.iter().map(Topping::id).collect())?;
                session.advance()?;
                Ok(Step::Continue(menu::order_summary(
                    &pizza, quantity, &chosen, &totals,
                )))
            }

            Stage::ConfirmOrder => match selection {
                "1" => {
                    let order = self.pending_order(session).await?;
                    let receipt = self.orders.submit(order).await?;
                    info!(
                        order_number = %receipt.order_number,
                        total = %receipt.grand_total,
                        "order submitted"
                    );
                    Ok(Step::Committed(menu::order_placed(&receipt.order_number)))
                }
                "2" => Ok(Step::End(menu::order_cancelled())),
                _ => Err(Rejection::Confirmation.into()),
            },
        }
    }

    async fn resolve_pizza(&self, selected: &SelectedPizza) -> Result<Pizza, UssdError> {
        self.catalog
            .find_pizza(selected.id)
            .await?
            .ok_or_else(|| UssdError::NotFound(format!("Pizza {}", selected.name)))
    }

    /// Rebuild the order from the ids stored in the session.
    async fn pending_order(&self, session: &SessionState) -> Result<PendingOrder, UssdError> {
        let (selected, quantity) = session.context().require_pizza_and_quantity()?;
        let topping_ids: Vec<ToppingId> = session
            .context()
            .toppings()
            .ok_or_else(|| DomainError::invariant("session has no toppings selected"))?
            .iter()
            .copied()
            .collect();

        let pizza = self.resolve_pizza(selected).await?;
        let toppings = self.catalog.find_toppings(&topping_ids).await?;
        if !same_ids(&topping_ids, &toppings) {
            return Err(UssdError::NotFound("A selected topping".to_string()));
        }

        Ok(PendingOrder::new(pizza, quantity, toppings)?)
    }
}

fn same_ids(wanted: &[ToppingId], found: &[Topping]) -> bool {
    let found: BTreeSet<ToppingId> = found.iter().map(Topping::id).collect();
    found.len() == wanted.len() && wanted.iter().all(|id| found.contains(id))
}

/// Blank or absent ids are `MissingSessionId`; anything else unusable is `InvalidSessionId`.
pub fn parse_session_id(raw: Option<&str>) -> Result<SessionId, UssdError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(UssdError::MissingSessionId);
    }
    SessionId::parse(raw).map_err(|e| UssdError::InvalidSessionId(e.to_string()))
}
