use std::sync::Arc;

use jewelstore_cart::{CartSession, SessionStore};
use jewelstore_catalog::Catalog;

use crate::context::SessionContext;

/// Shared request state: the immutable catalog and the cart session store.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    sessions: Arc<dyn SessionStore>,
}

impl AppServices {
    pub fn new(catalog: Arc<Catalog>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { catalog, sessions }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The requesting visitor's cart.
    pub fn cart(&self, session: &SessionContext) -> CartSession<Arc<dyn SessionStore>> {
        CartSession::new(self.sessions.clone(), session.session_id())
    }
}
