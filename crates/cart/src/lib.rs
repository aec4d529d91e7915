//! Shopping cart and checkout.
//!
//! A [`Cart`] is a plain id → quantity map. [`CartSession`] binds one visitor's
//! cart to a [`SessionStore`]; checkout turns the cart into an [`Order`] and
//! leaves it empty. Nothing here is persisted beyond the store's lifetime.

pub mod cart;
pub mod order;
pub mod session;

pub use cart::{Cart, CartLine, CartSnapshot, CartView};
pub use order::{submit, CheckoutError, CheckoutForm, CustomerDetails, Order, REQUIRED_FIELDS};
pub use session::{CartSession, InMemorySessionStore, SessionStore};
