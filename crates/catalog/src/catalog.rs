use std::collections::{BTreeSet, HashMap};

use jewelstore_core::{DomainError, DomainResult, ProductId};

use crate::product::{Category, Product};

/// Read-only product collection, built once at startup and shared by all requests.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    demo: bool,
}

impl Catalog {
    /// Build a catalog in the given order. A repeated id keeps its first occurrence.
    pub fn new(products: Vec<Product>) -> Self {
        let mut index = HashMap::with_capacity(products.len());
        let mut unique = Vec::with_capacity(products.len());
        for product in products {
            if index.contains_key(&product.id()) {
                continue;
            }
            index.insert(product.id(), unique.len());
            unique.push(product);
        }

        Self {
            products: unique,
            index,
            demo: false,
        }
    }

    pub(crate) fn into_demo(mut self) -> Self {
        self.demo = true;
        self
    }

    /// Whether this is the built-in fallback rather than the configured source.
    pub fn is_demo(&self) -> bool {
        self.demo
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products in load order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn by_id(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&i| &self.products[i])
    }

    /// Like [`Catalog::by_id`], but an unknown id is a [`DomainError::NotFound`].
    pub fn require(&self, id: ProductId) -> DomainResult<&Product> {
        self.by_id(id).ok_or_else(DomainError::not_found)
    }

    /// Products whose category label equals `category`, in load order.
    ///
    /// Labels that are not categories yield nothing.
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        match Category::from_label(category) {
            Some(category) => self
                .products
                .iter()
                .filter(|p| p.category() == category)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Distinct categories present in the catalog.
    pub fn categories(&self) -> BTreeSet<Category> {
        self.products.iter().map(Product::category).collect()
    }
}
