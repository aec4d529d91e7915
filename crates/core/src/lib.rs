//! `jewelstore-core` — shared storefront primitives.
//!
//! Identifiers and the domain error model used by the catalog, cart and API
//! crates. No IO lives here.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId, SessionId};
