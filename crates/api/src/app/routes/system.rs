use axum::{extract::Extension, response::IntoResponse, Json};

use crate::app::services::AppServices;

pub async fn health(Extension(services): Extension<AppServices>) -> impl IntoResponse {
    let catalog = services.catalog();
    Json(serde_json::json!({
        "status": "ok",
        "products": catalog.len(),
        "demo_catalog": catalog.is_demo(),
    }))
}
