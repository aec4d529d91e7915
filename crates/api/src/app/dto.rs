use serde::Deserialize;
use serde_json::json;

use jewelstore_cart::{CartView, Order};
use jewelstore_catalog::{Catalog, Product};
use jewelstore_core::ProductId;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
}

/// Path ids are parsed here rather than by the extractor so a bad id gets the
/// same JSON error shape as everything else.
pub fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse().map_err(errors::invalid_id_to_response)
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn catalog_page_to_json(
    catalog: &Catalog,
    products: &[&Product],
    selected: Option<&str>,
) -> serde_json::Value {
    json!({
        "products": products,
        "categories": catalog.categories(),
        "selected_category": selected,
    })
}

pub fn cart_to_json(view: &CartView) -> serde_json::Value {
    json!({
        "items": view.lines,
        "item_count": view.lines.iter().map(|l| l.quantity).sum::<u64>(),
        "total": view.total,
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    json!({
        "order_id": order.id.to_string(),
        "customer": order.customer,
        "order_date": order.placed_at.to_rfc3339(),
        "cart": order.items,
        "items": order.lines,
        "total": order.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn path_ids_parse_or_map_to_bad_request() {
        assert_eq!(parse_product_id("42").map(ProductId::get).ok(), Some(42));

        for raw in ["0", "-1", "abc", "1.5"] {
            let res = parse_product_id(raw).unwrap_err();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{raw}");
        }
    }
}
