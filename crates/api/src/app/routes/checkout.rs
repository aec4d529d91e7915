use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use jewelstore_cart::{submit, CheckoutForm, REQUIRED_FIELDS};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new().route("/checkout", get(checkout_page).post(place_order))
}

pub async fn checkout_page(
    Extension(services): Extension<AppServices>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let view = services.cart(&session).cart().view(services.catalog());
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "required_fields": REQUIRED_FIELDS,
            "cart": dto::cart_to_json(&view),
        })),
    )
        .into_response()
}

/// Validate the form first so a rejected submission leaves the cart intact,
/// then snapshot-and-clear the cart and build the order.
pub async fn place_order(
    Extension(services): Extension<AppServices>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<CheckoutForm>,
) -> axum::response::Response {
    let customer = match form.validate() {
        Ok(c) => c,
        Err(e) => {
            tracing::info!(session = %session.session_id(), error = %e, "checkout rejected");
            return errors::checkout_error_to_response(e);
        }
    };

    let snapshot = services.cart(&session).checkout();
    let order = submit(customer, snapshot, services.catalog(), Utc::now());

    tracing::info!(
        order_id = %order.id,
        session = %session.session_id(),
        lines = order.lines.len(),
        total = order.total,
        "order submitted"
    );

    (StatusCode::OK, Json(dto::order_to_json(&order))).into_response()
}
