//! Product catalog for the storefront.
//!
//! Everything here is built once at process start: a tabular source is read,
//! each row is validated and turned into a [`Product`] (name, category and image
//! derived from free text), and the result is frozen into a read-only
//! [`Catalog`]. Load failures never escape: the loader falls back to a small
//! demo catalog so the storefront is never blank.

pub mod catalog;
pub mod classifier;
pub mod demo;
pub mod error;
pub mod image;
pub mod loader;
pub mod product;
pub mod source;

pub use catalog::Catalog;
pub use classifier::{build_name, classify};
pub use error::{CatalogLoadError, ImageNormalizationError, RowValidationError};
pub use image::{normalize, ResolvedImage, PLACEHOLDER_IMAGE};
pub use loader::{load, load_table};
pub use product::{Category, Product, DEFAULT_DESCRIPTION, DEFAULT_SIZE};
pub use source::{Cell, Table};
