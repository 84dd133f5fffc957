//! Loading and exporting framework catalogs as JSON.

use promptframe_registry::{Catalog, CatalogError, Registry};

#[derive(Debug, thiserror::Error)]
pub enum CatalogJsonError {
    #[error("Invalid catalog JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Invalid catalog: {0}")]
    Invalid(#[from] CatalogError),
}

/// Parse and validate a catalog file.
pub fn parse_catalog_json_str(s: &str) -> Result<Registry, CatalogJsonError> {
    let catalog: Catalog = serde_json::from_str(s).map_err(CatalogJsonError::InvalidJson)?;
    Ok(Registry::from_catalog(catalog)?)
}

/// Export a registry in the catalog wire format.
pub fn catalog_to_json_string(registry: &Registry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&registry.to_catalog())
}
