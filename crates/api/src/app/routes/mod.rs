use axum::Router;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod system;

/// Router for all session-scoped storefront endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(catalog::router())
        .merge(cart::router())
        .merge(checkout::router())
}
