//! Session-scoped carts.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use jewelstore_core::{ProductId, SessionId};

use crate::cart::{Cart, CartSnapshot};

/// Server-side storage of one cart per visitor session.
///
/// `modify` must run the closure under the store's own exclusion for that
/// session, so a read-modify-write (and in particular snapshot-and-clear) is
/// never observed half-done.
pub trait SessionStore: Send + Sync {
    /// Current cart for the session; empty when unknown or expired. Reading a
    /// live session refreshes its idle timer.
    fn cart(&self, session: SessionId) -> Cart;

    /// Mutate the session's cart in place.
    fn modify(&self, session: SessionId, f: &mut dyn FnMut(&mut Cart));

    /// Drop expired sessions. Returns how many were removed.
    fn purge_expired(&self) -> usize;
}

impl<S> SessionStore for Arc<S>
where
    S: SessionStore + ?Sized,
{
    fn cart(&self, session: SessionId) -> Cart {
        (**self).cart(session)
    }

    fn modify(&self, session: SessionId, f: &mut dyn FnMut(&mut Cart)) {
        (**self).modify(session, f)
    }

    fn purge_expired(&self) -> usize {
        (**self).purge_expired()
    }
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Clone)]
struct Entry {
    cart: Cart,
    touched_at: DateTime<Utc>,
}

/// In-process session store with idle expiry.
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<SessionId, Entry>>,
    idle_ttl: Duration,
    clock: Clock,
}

impl core::fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemorySessionStore")
            .field("idle_ttl", &self.idle_ttl)
            .finish_non_exhaustive()
    }
}

impl InMemorySessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self::with_clock(idle_ttl, Arc::new(Utc::now))
    }

    pub fn with_clock(idle_ttl: Duration, clock: Clock) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            idle_ttl,
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_live(&self, entry: &Entry, now: DateTime<Utc>) -> bool {
        now - entry.touched_at <= self.idle_ttl
    }
}

impl SessionStore for InMemorySessionStore {
    fn cart(&self, session: SessionId) -> Cart {
        let now = (self.clock)();
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        match map.get_mut(&session) {
            Some(entry) if now - entry.touched_at <= self.idle_ttl => {
                entry.touched_at = now;
                entry.cart.clone()
            }
            _ => Cart::new(),
        }
    }

    fn modify(&self, session: SessionId, f: &mut dyn FnMut(&mut Cart)) {
        let now = (self.clock)();
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        let mut cart = match map.remove(&session) {
            Some(entry) if self.is_live(&entry, now) => entry.cart,
            Some(_) => {
                debug!(%session, "session expired; starting a fresh cart");
                Cart::new()
            }
            None => Cart::new(),
        };

        f(&mut cart);

        // Empty carts are not kept; a later read yields the same empty cart.
        if !cart.is_empty() {
            map.insert(session, Entry { cart, touched_at: now });
        }
    }

    fn purge_expired(&self) -> usize {
        let now = (self.clock)();
        let mut map = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let before = map.len();
        map.retain(|_, entry| self.is_live(entry, now));
        before - map.len()
    }
}

/// One visitor's cart, bound to the session store.
///
/// Only add, remove, read and snapshot-and-clear are exposed.
#[derive(Debug, Clone)]
pub struct CartSession<S> {
    store: S,
    session: SessionId,
}

impl<S: SessionStore> CartSession<S> {
    pub fn new(store: S, session: SessionId) -> Self {
        Self { store, session }
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn cart(&self) -> Cart {
        self.store.cart(self.session)
    }

    /// Returns the new quantity.
    pub fn add(&self, product: ProductId) -> u64 {
        let mut quantity = 0;
        self.store
            .modify(self.session, &mut |cart: &mut Cart| quantity = cart.add(product));
        quantity
    }

    /// Returns whether the item was present.
    pub fn remove(&self, product: ProductId) -> bool {
        let mut removed = false;
        self.store
            .modify(self.session, &mut |cart: &mut Cart| removed = cart.remove(product));
        removed
    }

    /// Snapshot the cart and reset it to empty in one store operation.
    pub fn checkout(&self) -> CartSnapshot {
        let mut snapshot = CartSnapshot::default();
        self.store
            .modify(self.session, &mut |cart: &mut Cart| snapshot = cart.checkout());
        snapshot
    }
}
