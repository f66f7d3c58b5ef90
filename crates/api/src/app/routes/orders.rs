use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `POST /v1/orders`: price and place an order in one request.
pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::DirectOrderBody>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_json", e.body_text()),
    };

    let request = match body.into_request() {
        Ok(r) => r,
        Err(e) => return errors::order_error_to_response(e),
    };

    match services.orders.place(request).await {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(e) => errors::order_error_to_response(e),
    }
}
