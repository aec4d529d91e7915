use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use jewelstore_catalog::{Catalog, Product};
use jewelstore_core::ProductId;

/// Per-visitor cart: product id → quantity.
///
/// Quantities are always positive; removing an item deletes its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<ProductId, u64>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit. Ids are not checked against the catalog. Returns the new quantity.
    pub fn add(&mut self, id: ProductId) -> u64 {
        let qty = self.items.entry(id).or_insert(0);
        *qty = qty.saturating_add(1);
        *qty
    }

    /// Drop the item entirely. Returns whether it was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        self.items.remove(&id).is_some()
    }

    pub fn quantity(&self, id: ProductId) -> Option<u64> {
        self.items.get(&id).copied()
    }

    pub fn items(&self) -> &BTreeMap<ProductId, u64> {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take the current contents, leaving the cart empty.
    pub fn checkout(&mut self) -> CartSnapshot {
        CartSnapshot {
            items: std::mem::take(&mut self.items),
        }
    }

    pub fn view(&self, catalog: &Catalog) -> CartView {
        CartView::price(&self.items, catalog)
    }
}

/// Cart contents frozen at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartSnapshot {
    items: BTreeMap<ProductId, u64>,
}

impl CartSnapshot {
    pub fn items(&self) -> &BTreeMap<ProductId, u64> {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<BTreeMap<ProductId, u64>> for CartSnapshot {
    fn from(items: BTreeMap<ProductId, u64>) -> Self {
        Self { items }
    }
}

/// One priced cart entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u64,
    pub total: f64,
}

/// Cart priced against the current catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: f64,
}

impl CartView {
    /// Entries whose id is not in the catalog are left out.
    pub fn price(items: &BTreeMap<ProductId, u64>, catalog: &Catalog) -> Self {
        let lines = items
            .iter()
            .filter_map(|(&id, &quantity)| {
                catalog.by_id(id).map(|product| CartLine {
                    product: product.clone(),
                    quantity,
                    total: product.price() * quantity as f64,
                })
            })
            .collect::<Vec<_>>();
        let total = lines.iter().map(|l| l.total).sum();

        Self { lines, total }
    }
}
