use core::fmt;
use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use promptframe_core::model::Document;
use promptframe_registry::{Framework, Registry, SectionKey};

use crate::reconcile::build_section_nodes;

/// How a framework lands on a document the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyMode {
    /// Drop everything and emit only placeholder sections.
    #[serde(rename = "replace")]
    Replace,
    /// Put placeholder sections above the untouched document.
    #[serde(rename = "insertTop")]
    InsertTop,
}

impl ApplyMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ApplyMode::Replace => "replace",
            ApplyMode::InsertTop => "insertTop",
        }
    }
}

impl fmt::Display for ApplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).as_str())
    }
}

impl FromStr for ApplyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replace" => Ok(ApplyMode::Replace),
            "insertTop" | "insert-top" | "insert_top" => Ok(ApplyMode::InsertTop),
            other => Err(format!(
                "unknown apply mode '{other}' (expected replace or insert-top)"
            )),
        }
    }
}

/// One-shot framework application, no reconciliation and no confirmation.
///
/// `Replace` is meant for documents without text; `InsertTop` merges into
/// existing free-form content without touching it. Sections come out in the
/// framework's declared order whatever the order of `keys`.
pub fn apply_framework(
    registry: &Registry,
    document: &Document,
    framework: &Framework,
    keys: &[SectionKey],
    mode: ApplyMode,
) -> Document {
    let mut blocks = build_section_nodes(registry, framework, keys, &BTreeMap::new());
    tracing::debug!(
        framework = %framework.id,
        mode = %mode,
        sections = blocks.len(),
        "applying framework"
    );

    match mode {
        ApplyMode::Replace => Document::new(blocks).or_empty(),
        ApplyMode::InsertTop => {
            blocks.extend(document.blocks.iter().cloned());
            Document::new(blocks).or_empty()
        }
    }
}
