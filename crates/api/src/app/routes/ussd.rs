use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// `POST /v1/order`: advance one USSD session by one selection.
pub async fn handle_hop(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::UssdRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_json", e.body_text()),
    };

    let selection = body.selection.unwrap_or_default();
    match services
        .machine
        .handle(body.session_id.as_deref(), &selection)
        .await
    {
        Ok(reply) => (StatusCode::OK, Json(dto::UssdResponse { menu: reply.menu })).into_response(),
        Err(e) => errors::ussd_error_to_response(e),
    }
}
