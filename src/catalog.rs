// Product catalog: loading and canonical-name resolution

use std::path::Path;

use tracing::info;

use crate::error::ConfigError;

pub mod index;
pub mod product;

pub use index::{CatalogIndex, MatchKind, Resolution, Strategy, FUZZY_THRESHOLD, RESOLUTION_ORDER};
pub use product::{Product, DEFAULT_CATEGORY};

/// Read the product catalog (a JSON array of products) from disk.
pub fn load_products(path: impl AsRef<Path>) -> Result<Vec<Product>, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        what: "product catalog",
        path: path.to_path_buf(),
        source,
    })?;
    let products: Vec<Product> =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            what: "product catalog",
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), count = products.len(), "Loaded product catalog");
    Ok(products)
}
