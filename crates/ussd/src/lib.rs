//! USSD ordering session machine.
//!
//! A session walks a fixed menu sequence:
//!
//! ```text
//! MAIN_MENU → MAIN_MENU_SELECTION → SELECT_SIZE → SELECT_QUANTITY
//!           → SELECT_TOPPINGS → CONFIRM_ORDER → (committed | cancelled)
//! ```
//!
//! Each request carries a session id and one selection string. The machine
//! validates the selection against the current stage, records what was chosen
//! and answers with the next menu. Catalog reads, session persistence and
//! order submission go through the traits in [`ports`].

pub mod error;
pub mod input;
pub mod machine;
pub mod menu;
pub mod ports;
pub mod session;
pub mod stage;

pub use error::{Rejection, UssdError};
pub use machine::{UssdMachine, UssdReply};
pub use ports::{CatalogStore, OrderSink, SessionStore, StoreError};
pub use session::{SelectedPizza, SessionContext, SessionState};
pub use stage::Stage;
