//! Built-in fallback catalog, served when the configured source can't be read.

use jewelstore_core::ProductId;

use crate::catalog::Catalog;
use crate::product::{Category, Product};

/// Raw demo rows: id, name, price, description, category, image.
const DEMO_ROWS: [(u64, &str, f64, &str, Category, &str); 4] = [
    (
        1,
        "Gold ring with diamond",
        45_000.0,
        "Elegant 585 gold ring with a natural 0.5 carat diamond",
        Category::Rings,
        "/static/images/ring1.jpg",
    ),
    (
        2,
        "Silver earrings with pearl",
        8_500.0,
        "Delicate silver earrings with natural river pearls",
        Category::Earrings,
        "/static/images/earrings1.jpg",
    ),
    (
        3,
        "Gold chain",
        25_000.0,
        "Classic 585 gold anchor-link chain",
        Category::ChainsAndNecklaces,
        "/static/images/chain1.jpg",
    ),
    (
        4,
        "Charm bracelet",
        12_000.0,
        "Stylish silver bracelet with decorative charms",
        Category::Bracelets,
        "/static/images/bracelet1.jpg",
    ),
];

pub fn demo_products() -> Vec<Product> {
    DEMO_ROWS
        .iter()
        .filter_map(|&(id, name, price, description, category, image)| {
            ProductId::new(id)
                .map(|id| Product::curated(id, name, price, description, category, image))
        })
        .collect()
}

pub fn demo_catalog() -> Catalog {
    Catalog::new(demo_products()).into_demo()
}
