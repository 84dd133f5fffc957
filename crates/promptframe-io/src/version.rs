//! Wire format and schema version constants.

/// Catalog JSON format version (`"version"` field).
pub const CATALOG_V: u8 = promptframe_registry::CATALOG_V;

/// Root node type of editor document JSON.
pub const DOCUMENT_ROOT_TYPE: &str = promptframe_json::schema::DOC_TYPE;

/// JSON Schema bundle version for on-disk schemas under `schemas/`.
///
/// Bump this if the schema constraints change (even if `version` stays the same).
pub const SCHEMA_BUNDLE_V: u8 = 1;
