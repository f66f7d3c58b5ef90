use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pizzeria_infra::OrderRequestError;
use pizzeria_ussd::UssdError;

/// HTTP status for a stable error code.
pub fn status_for(code: &str) -> StatusCode {
    match code {
        "missing_input" | "validation_error" | "invalid_json" => StatusCode::BAD_REQUEST,
        "not_found" => StatusCode::CONFLICT,
        "store_error" => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn ussd_error_to_response(err: UssdError) -> axum::response::Response {
    log_server_side(err.code(), &err);
    json_error(status_for(err.code()), err.code(), err.to_string())
}

pub fn order_error_to_response(err: OrderRequestError) -> axum::response::Response {
    log_server_side(err.code(), &err);
    json_error(status_for(err.code()), err.code(), err.to_string())
}

fn log_server_side(code: &str, err: &dyn std::fmt::Display) {
    if status_for(code).is_server_error() {
        tracing::error!(code, error = %err, "request failed");
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
            "code": code,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_ussd::{Rejection, StoreError};

    #[test]
    fn codes_map_to_statuses() {
        assert_eq!(status_for("missing_input"), StatusCode::BAD_REQUEST);
        assert_eq!(status_for("validation_error"), StatusCode::BAD_REQUEST);
        assert_eq!(status_for("not_found"), StatusCode::CONFLICT);
        assert_eq!(status_for("invariant_violation"), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for("store_error"), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn ussd_errors_use_their_code() {
        let res = ussd_error_to_response(UssdError::Invalid(Rejection::Quantity));
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = ussd_error_to_response(UssdError::Store(StoreError::backend("down")));
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
