//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared state (catalog, session store)
//! - `routes/`: HTTP routes + handlers (one file per storefront area)
//! - `dto.rs`: query/form DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{self, SessionCookie};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: AppServices, cookie: SessionCookie) -> Router {
    let health = Router::new()
        .route("/health", get(routes::system::health))
        .layer(Extension(services.clone()));

    // Storefront routes: every request carries a visitor session.
    let storefront = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            cookie,
            middleware::session_middleware,
        ));

    Router::new()
        .merge(health)
        .merge(storefront)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use jewelstore_cart::InMemorySessionStore;
    use jewelstore_catalog::demo::demo_catalog;

    use super::*;

    fn app() -> Router {
        let services = AppServices::new(
            Arc::new(demo_catalog()),
            Arc::new(InMemorySessionStore::new(chrono::Duration::hours(1))),
        );
        build_app(services, SessionCookie::new(false))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_bypasses_sessions() {
        let res = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn storefront_requests_pass_through_the_full_layer_stack() {
        let res = app().oneshot(get("/cart")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(header::SET_COOKIE).is_some());

        let res = app().oneshot(get("/no/such/page")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
