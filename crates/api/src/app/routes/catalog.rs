use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
    Json, Router,
};

use crate::app::dto;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/product/:id", get(get_product))
}

/// Catalog page. An empty `category` means no filter; an unknown one yields no products.
pub async fn list_products(
    Extension(services): Extension<AppServices>,
    Query(query): Query<dto::CatalogQuery>,
) -> axum::response::Response {
    let catalog = services.catalog();
    let selected = query.category.as_deref().filter(|c| !c.is_empty());

    let products = match selected {
        Some(category) => catalog.by_category(category),
        None => catalog.all().iter().collect(),
    };

    (
        StatusCode::OK,
        Json(dto::catalog_page_to_json(catalog, &products, selected)),
    )
        .into_response()
}

/// Product page. Unknown ids send the visitor back to the catalog.
pub async fn get_product(
    Extension(services): Extension<AppServices>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match dto::parse_product_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.catalog().require(product_id) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(err) => {
            tracing::debug!(%product_id, error = %err, "redirecting to catalog");
            Redirect::to("/").into_response()
        }
    }
}
