//! HTTP storefront: routing, session cookies, and request/response mapping.
//!
//! The catalog is loaded once and injected; carts live in a server-side
//! session store keyed by the session cookie.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
