//! `promptframe-io` is the single supported public entrypoint for promptframe:
//! the document model, the framework catalog, section reconciliation and
//! context injection, plus the JSON formats they travel in.
//!
//! The engine itself never touches files or terminals. This crate adds the
//! parsing and serialization edges:
//! - editor document JSON
//! - catalog JSON
//! - injection item lists

// -----------------------------------------------------------------------------
// Public API contract
// -----------------------------------------------------------------------------
//
// Consumers SHOULD import from `promptframe_io::prelude::*`.
// Anything not re-exported via the prelude is considered internal and may change
// without notice.

// Re-export the document model.
#[doc(hidden)]
pub mod core {
    pub use promptframe_core::hash::{canonicalize_text, fingerprint, xxh64_hex};
    pub use promptframe_core::model::{
        Attrs, BlockNode, Container, Document, InlineRun, Mark, TextLine,
    };
}

// Re-export the catalog.
#[doc(hidden)]
pub mod registry {
    pub use promptframe_registry::{
        Catalog, CatalogError, Framework, FrameworkId, InjectTarget, LineDefinition,
        PrefixOverlap, Registry, SectionDefinition, SectionKey, format_checklist_label,
        normalize_label, removal_prompt,
    };
}

// Re-export the engine operations.
#[doc(hidden)]
pub mod engine {
    pub use promptframe_engine::{
        AlwaysConfirm, ApplyDecision, ApplyMode, FrameworkSession, InjectItem, InjectOptions,
        Injected, MatchedLine, MissingPlacement, NeverConfirm, OperationReport, PendingApply,
        Reconciled, RemovalConfirmer, Segment, SessionError, SessionUpdate, apply_framework,
        extract_all_segments, extract_segments, inject, parse_block, parse_line, reconcile,
        section_body_text,
    };
}

// Re-export the editor JSON schema.
#[doc(hidden)]
pub mod json {
    pub use promptframe_json::convert::{ConvertError, from_document, to_document};
    pub use promptframe_json::schema::JsonNode;
    pub use promptframe_json::serialize::{to_minified_json, to_pretty_json};
}

/// Catalog JSON loading and export.
pub mod catalog_json;

/// Editor document JSON parsing with actionable errors.
pub mod document_json;

/// Injection item parsing.
pub mod inject_json;

/// Version constants for wire formats and schemas.
pub mod version;

/// Convenience prelude for consumers.
///
/// This is the **only supported** import surface for external users.
pub mod prelude {
    pub use crate::catalog_json::{CatalogJsonError, catalog_to_json_string, parse_catalog_json_str};
    pub use crate::core::{BlockNode, Document, InlineRun, TextLine, fingerprint};
    pub use crate::document_json::{DocumentJsonError, document_to_json_string, parse_document_json_str};
    pub use crate::engine::{
        AlwaysConfirm, ApplyDecision, ApplyMode, FrameworkSession, InjectItem, InjectOptions,
        MissingPlacement, NeverConfirm, OperationReport, RemovalConfirmer, SessionError,
        SessionUpdate, apply_framework, extract_segments, inject, parse_line, reconcile,
    };
    pub use crate::inject_json::{InjectItemsJsonError, parse_inject_items_json_str};
    pub use crate::registry::{Framework, FrameworkId, InjectTarget, Registry, SectionKey};
}
