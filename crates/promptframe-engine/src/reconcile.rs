//! Rewriting a document so its framework sections match a desired set.

use std::collections::{BTreeMap, BTreeSet};

use promptframe_core::model::{BlockNode, Document};
use promptframe_registry::{Framework, Registry, SectionKey};

use crate::parse::parse_block;
use crate::report::OperationReport;
use crate::segment::extract_all_segments;

/// Asked before a section with content is removed.
///
/// Return `true` to proceed, `false` to abort the whole reconciliation.
/// Any `FnMut(&SectionKey) -> bool` is a confirmer.
pub trait RemovalConfirmer {
    fn confirm_removal(&mut self, section_key: &SectionKey) -> bool;
}

impl<F> RemovalConfirmer for F
where
    F: FnMut(&SectionKey) -> bool,
{
    fn confirm_removal(&mut self, section_key: &SectionKey) -> bool {
        self(section_key)
    }
}

/// Confirms every removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl RemovalConfirmer for AlwaysConfirm {
    fn confirm_removal(&mut self, _section_key: &SectionKey) -> bool {
        true
    }
}

/// Declines every removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl RemovalConfirmer for NeverConfirm {
    fn confirm_removal(&mut self, _section_key: &SectionKey) -> bool {
        false
    }
}

/// Result of [`reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    /// `false` when a removal was declined; `document` is then the input.
    pub applied: bool,
    pub document: Document,
    pub report: OperationReport,
}

/// Bring `document`'s sections for `framework` in line with `desired_keys`.
///
/// - Kept sections keep their body; their label line is rewritten to this
///   framework's label.
/// - Missing sections get a `"<LABEL>: "` placeholder line.
/// - Dropped sections with content need `confirmer`'s approval; a single
///   refusal aborts everything and returns the input unchanged.
/// - Blocks outside any section follow the sections, in original order.
///
/// Output section order is always the framework's declared order.
pub fn reconcile<C>(
    registry: &Registry,
    document: &Document,
    framework: &Framework,
    desired_keys: &[SectionKey],
    confirmer: &mut C,
) -> Reconciled
where
    C: RemovalConfirmer + ?Sized,
{
    let mut report = OperationReport::new("reconcile", Some(framework.id.as_str()), document);
    let segments = extract_all_segments(registry, document, framework);

    let ordered = registry.canonical_order(framework, desired_keys);
    let selected: BTreeSet<&SectionKey> = ordered.iter().collect();

    let mut existing_bodies: BTreeMap<&SectionKey, &[BlockNode]> = BTreeMap::new();
    let mut used_indexes = BTreeSet::new();
    // Dropped keys in first-seen order, with whether any of their runs has text.
    let mut dropped: Vec<(&SectionKey, bool)> = Vec::new();

    for segment in &segments {
        let key = &segment.section_key;
        let first_seen = !existing_bodies.contains_key(key);
        if first_seen {
            existing_bodies.insert(key, segment.body_nodes);
        }

        if selected.contains(key) {
            // A repeated label of a kept section stays behind as other content.
            if first_seen {
                used_indexes.extend(segment.start_index..segment.end_index);
            }
            continue;
        }

        // Every run of a dropped section goes, repeats included.
        used_indexes.extend(segment.start_index..segment.end_index);
        let has_content = !section_body_text(registry, segment.body_nodes).is_empty();
        match dropped.iter_mut().find(|(k, _)| *k == key) {
            Some((_, any_content)) => *any_content |= has_content,
            None => dropped.push((key, has_content)),
        }
    }

    for &(key, has_content) in &dropped {
        if has_content {
            report.confirmations.push(key.clone());
            if !confirmer.confirm_removal(key) {
                tracing::debug!(section = %key, "removal declined, reconciliation aborted");
                report.declined = Some(key.clone());
                let unchanged = document.clone();
                let report = report.finish(false, &unchanged);
                return Reconciled {
                    applied: false,
                    document: unchanged,
                    report,
                };
            }
        }
        report.removed.push(key.clone());
    }

    for key in &ordered {
        if existing_bodies.contains_key(key) {
            report.kept.push(key.clone());
        } else {
            report.added.push(key.clone());
        }
    }

    let mut blocks = build_section_nodes(registry, framework, &ordered, &existing_bodies);
    blocks.extend(
        document
            .blocks
            .iter()
            .enumerate()
            .filter(|(i, _)| !used_indexes.contains(i))
            .map(|(_, node)| node.clone()),
    );

    let document = Document::new(blocks).or_empty();
    let report = report.finish(true, &document);
    tracing::debug!(
        framework = %framework.id,
        kept = report.kept.len(),
        added = report.added.len(),
        removed = report.removed.len(),
        "sections reconciled"
    );

    Reconciled {
        applied: true,
        document,
        report,
    }
}

/// Text a removal would destroy: first-line remainder plus every following
/// block, newline-joined and trimmed.
pub fn section_body_text(registry: &Registry, body_nodes: &[BlockNode]) -> String {
    body_nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            if i == 0 {
                if let Some(parsed) = parse_block(registry, node) {
                    return parsed.remainder;
                }
            }
            node.plain_text()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Emit the framework's sections for `keys` in declared order.
///
/// Sections found in `existing_bodies` keep their blocks; the rest become
/// placeholder lines.
pub(crate) fn build_section_nodes(
    registry: &Registry,
    framework: &Framework,
    keys: &[SectionKey],
    existing_bodies: &BTreeMap<&SectionKey, &[BlockNode]>,
) -> Vec<BlockNode> {
    let selected: BTreeSet<&SectionKey> = keys.iter().collect();
    let mut nodes = Vec::new();

    for section in &framework.sections {
        if !selected.contains(&section.section_key) {
            continue;
        }

        match existing_bodies.get(&section.section_key) {
            Some([first, rest @ ..]) => {
                nodes.push(relabel_line(registry, first, &section.label));
                nodes.extend(rest.iter().cloned());
            }
            _ => nodes.push(section_line(&section.label, "")),
        }
    }

    nodes
}

/// `"<LABEL>: <body>"`, or `"<LABEL>: "` when the body is blank.
pub(crate) fn section_line(label: &str, body: &str) -> BlockNode {
    let body = body.trim();
    if body.is_empty() {
        BlockNode::paragraph(format!("{label}: "))
    } else {
        BlockNode::paragraph(format!("{label}: {body}"))
    }
}

/// Swap the label on a section's first line, keeping the remainder.
///
/// A line that already reads exactly right is kept as-is so inline marks on
/// it survive repeated reconciliation.
fn relabel_line(registry: &Registry, node: &BlockNode, label: &str) -> BlockNode {
    let line_text = node.as_text_line().map(|l| l.text()).unwrap_or_default();
    let remainder = match parse_block(registry, node) {
        Some(parsed) => parsed.remainder,
        None => line_text.trim().to_string(),
    };

    let next = section_line(label, &remainder);
    if next.plain_text() == line_text {
        node.clone()
    } else {
        next
    }
}
