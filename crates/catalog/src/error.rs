//! Catalog error model.
//!
//! None of these reach a request handler: load errors trigger the demo
//! fallback, row errors skip the row, image errors substitute the placeholder.

use std::path::PathBuf;

use thiserror::Error;

use jewelstore_core::ProductId;

/// The catalog source as a whole could not be used.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read spreadsheet {path}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("failed to read csv {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("spreadsheet {0} has no worksheets")]
    NoWorksheet(PathBuf),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
}

/// A single source row was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowValidationError {
    #[error("missing {column}")]
    Missing { column: &'static str },

    #[error("{column} is not a valid {expected}: {raw:?}")]
    Unparseable {
        column: &'static str,
        expected: &'static str,
        raw: String,
    },

    #[error("price must be a finite non-negative number, got {0}")]
    InvalidPrice(f64),

    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// A share link could not be rewritten into a thumbnail URL.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed share link {url:?}: {reason}")]
pub struct ImageNormalizationError {
    pub url: String,
    pub reason: &'static str,
}

impl ImageNormalizationError {
    pub fn malformed(url: &str, reason: &'static str) -> Self {
        Self {
            url: url.to_string(),
            reason,
        }
    }
}
