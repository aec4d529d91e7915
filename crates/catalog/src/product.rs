use serde::{Deserialize, Serialize};

use jewelstore_core::ProductId;

use crate::classifier;
use crate::image;

/// Description used when the source row leaves it blank.
pub const DEFAULT_DESCRIPTION: &str = "Beautiful handmade jewelry";

/// Size used when the source row leaves it blank.
pub const DEFAULT_SIZE: &str = "Universal";

/// Closed set of storefront categories.
///
/// Declaration order is the display order used by [`crate::Catalog::categories`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Rings")]
    Rings,
    #[serde(rename = "Earrings")]
    Earrings,
    #[serde(rename = "Chains and necklaces")]
    ChainsAndNecklaces,
    #[serde(rename = "Bracelets")]
    Bracelets,
    #[serde(rename = "Pendants")]
    Pendants,
    #[serde(rename = "Brooches")]
    Brooches,
    #[serde(rename = "Cufflinks")]
    Cufflinks,
    /// Catch-all for descriptions that match no keyword group.
    #[serde(rename = "Jewelry")]
    Jewelry,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Rings,
        Category::Earrings,
        Category::ChainsAndNecklaces,
        Category::Bracelets,
        Category::Pendants,
        Category::Brooches,
        Category::Cufflinks,
        Category::Jewelry,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Rings => "Rings",
            Category::Earrings => "Earrings",
            Category::ChainsAndNecklaces => "Chains and necklaces",
            Category::Bracelets => "Bracelets",
            Category::Pendants => "Pendants",
            Category::Brooches => "Brooches",
            Category::Cufflinks => "Cufflinks",
            Category::Jewelry => "Jewelry",
        }
    }

    /// Exact (case-sensitive) label lookup; anything else is not a category.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A purchasable item. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    description: String,
    category: Category,
    size: String,
    image: String,
    is_external_image: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_photo_ref: Option<String>,
}

impl Product {
    /// Build a product from raw listing fields, deriving the display name,
    /// category and image the same way the catalog loader does.
    ///
    /// `price` must already be validated as finite and non-negative.
    pub fn from_listing(
        id: ProductId,
        price: f64,
        description: Option<&str>,
        size: Option<&str>,
        photo_ref: Option<&str>,
    ) -> Self {
        let description = description.map(str::trim).unwrap_or_default();
        let resolved = image::normalize(photo_ref);

        Self {
            id,
            name: classifier::build_name(description, id),
            price,
            description: non_blank_or(description, DEFAULT_DESCRIPTION),
            category: classifier::classify(description),
            size: non_blank_or(size.map(str::trim).unwrap_or_default(), DEFAULT_SIZE),
            image: resolved.url,
            is_external_image: resolved.is_external,
            source_photo_ref: photo_ref.map(str::to_string),
        }
    }

    /// Hand-authored product (demo data): nothing is derived.
    pub(crate) fn curated(
        id: ProductId,
        name: &str,
        price: f64,
        description: &str,
        category: Category,
        image: &str,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            description: description.to_string(),
            category,
            size: DEFAULT_SIZE.to_string(),
            image: image.to_string(),
            is_external_image: false,
            source_photo_ref: None,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn is_external_image(&self) -> bool {
        self.is_external_image
    }

    pub fn source_photo_ref(&self) -> Option<&str> {
        self.source_photo_ref.as_deref()
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: u64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    #[test]
    fn listing_derives_name_category_and_image() {
        let p = Product::from_listing(
            pid(3),
            1500.0,
            Some("Серебряное кольцо с топазом"),
            Some("17"),
            Some("https://cloud.mail.ru/public/AbCd/xyz"),
        );

        assert_eq!(p.name(), "Ring silver with topaz");
        assert_eq!(p.category(), Category::Rings);
        assert_eq!(p.size(), "17");
        assert_eq!(p.image(), "https://thumb.cloud.mail.ru/weblink/thumb/xw1/AbCd/xyz");
        assert!(p.is_external_image());
        assert_eq!(p.source_photo_ref(), Some("https://cloud.mail.ru/public/AbCd/xyz"));
    }

    #[test]
    fn blank_fields_fall_back_to_defaults() {
        let p = Product::from_listing(pid(9), 0.0, Some("  "), None, None);

        assert_eq!(p.name(), "Item №9");
        assert_eq!(p.description(), DEFAULT_DESCRIPTION);
        assert_eq!(p.size(), DEFAULT_SIZE);
        assert_eq!(p.category(), Category::Jewelry);
        assert_eq!(p.image(), crate::PLACEHOLDER_IMAGE);
        assert!(!p.is_external_image());
    }

    #[test]
    fn category_labels_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.label()), Some(c));
        }
        assert_eq!(Category::from_label("rings"), None);
        assert_eq!(Category::from_label("Watches"), None);
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&Category::ChainsAndNecklaces).unwrap();
        assert_eq!(json, "\"Chains and necklaces\"");
    }
}
