use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use promptframe_core::hash::fingerprint;
use promptframe_core::model::Document;
use promptframe_registry::SectionKey;

/// Deterministic, machine-readable summary of one engine operation.
///
/// Notes:
/// - Contains *no* wall-clock timestamps, so equal inputs give equal reports.
/// - Fingerprints let callers skip reloading the editor when nothing changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationReport {
    /// Operation name: "reconcile" or "inject".
    pub op: String,

    /// Whether the returned document should replace the input.
    pub applied: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    /// Sections that existed and were kept.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kept: Vec<SectionKey>,

    /// Sections synthesized as placeholders.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<SectionKey>,

    /// Sections dropped from the document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<SectionKey>,

    /// Sections the confirmer was asked about, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub confirmations: Vec<SectionKey>,

    /// The section whose removal was declined, when aborted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declined: Option<SectionKey>,

    /// Injection placements by kind: created, overwritten, appended, dropped.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub placements: BTreeMap<String, usize>,

    pub input_fingerprint: String,
    pub output_fingerprint: String,
}

impl OperationReport {
    pub(crate) fn new(op: &str, framework: Option<&str>, input: &Document) -> Self {
        let input_fingerprint = fingerprint(input);
        Self {
            op: op.to_string(),
            applied: false,
            framework: framework.map(str::to_string),
            kept: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
            confirmations: Vec::new(),
            declined: None,
            placements: BTreeMap::new(),
            output_fingerprint: input_fingerprint.clone(),
            input_fingerprint,
        }
    }

    pub(crate) fn finish(mut self, applied: bool, output: &Document) -> Self {
        self.applied = applied;
        self.output_fingerprint = fingerprint(output);
        self
    }

    pub(crate) fn count(&mut self, placement: &str) {
        *self.placements.entry(placement.to_string()).or_insert(0) += 1;
    }

    /// True when the output differs from the input.
    pub fn changed(&self) -> bool {
        self.input_fingerprint != self.output_fingerprint
    }
}
