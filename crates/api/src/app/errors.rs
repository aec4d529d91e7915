use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use jewelstore_cart::CheckoutError;
use jewelstore_core::DomainError;

/// Path ids that do not parse. Unknown-but-valid ids never get here: the
/// routes redirect or accept them instead.
pub fn invalid_id_to_response(err: DomainError) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_id", err.to_string())
}

pub fn checkout_error_to_response(err: CheckoutError) -> axum::response::Response {
    match &err {
        CheckoutError::RequiredFieldMissing(fields) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "validation_error",
                "message": err.to_string(),
                "missing_fields": fields,
            })),
        )
            .into_response(),
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
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
