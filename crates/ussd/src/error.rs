use thiserror::Error;

use pizzeria_core::DomainError;

use crate::ports::StoreError;

/// Which stage grammar a selection failed. `Display` is the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Invalid selection")]
    MenuSelection,
    #[error("Invalid pizza selection")]
    PizzaSelection,
    #[error("Invalid quantity")]
    Quantity,
    #[error("Invalid topping selection")]
    ToppingSelection,
    #[error("Invalid confirmation selection")]
    Confirmation,
}

/// Failure of a single `handle` call. None of these advance the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UssdError {
    /// No session id on the request.
    #[error("session_id is required")]
    MissingSessionId,

    /// Session id present but unusable (e.g. too long).
    #[error("invalid session_id: {0}")]
    InvalidSessionId(String),

    /// Selection outside the current stage's grammar.
    #[error(transparent)]
    Invalid(#[from] Rejection),

    /// A catalog record chosen earlier in the session no longer exists.
    #[error("{0} is no longer available")]
    NotFound(String),

    /// Stored session contradicts its own stage (e.g. toppings without a quantity).
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl UssdError {
    /// Stable machine-readable kind, used as the `code` field of error replies.
    pub fn code(&self) -> &'static str {
        match self {
            UssdError::MissingSessionId => "missing_input",
            UssdError::InvalidSessionId(_) | UssdError::Invalid(_) => "validation_error",
            UssdError::NotFound(_) => "not_found",
            UssdError::Domain(_) => "invariant_violation",
            UssdError::Store(_) => "store_error",
        }
    }
}
