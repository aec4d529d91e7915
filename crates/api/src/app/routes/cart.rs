use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};

use crate::app::dto;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub fn router() -> Router {
    Router::new()
        .route("/cart", get(view_cart))
        .route("/add_to_cart/:id", get(add_to_cart).post(add_to_cart))
        .route("/remove_from_cart/:id", get(remove_from_cart).post(remove_from_cart))
}

pub async fn view_cart(
    Extension(services): Extension<AppServices>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let view = services.cart(&session).cart().view(services.catalog());
    (StatusCode::OK, Json(dto::cart_to_json(&view))).into_response()
}

/// Ids missing from the catalog are still accepted into the cart.
pub async fn add_to_cart(
    Extension(services): Extension<AppServices>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    let quantity = services.cart(&session).add(product_id);
    tracing::debug!(session = %session.session_id(), %product_id, quantity, "added to cart");

    Redirect::to(&format!("/product/{product_id}")).into_response()
}

pub async fn remove_from_cart(
    Extension(services): Extension<AppServices>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    if services.cart(&session).remove(product_id) {
        tracing::debug!(session = %session.session_id(), %product_id, "removed from cart");
    }

    Redirect::to("/cart").into_response()
}
