use axum::{routing::post, Router};

pub mod orders;
pub mod system;
pub mod ussd;

/// Router for the versioned ordering endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/order", post(ussd::handle_hop))
        .route("/orders", post(orders::place_order))
}
