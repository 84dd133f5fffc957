//! Grouping document blocks into framework sections.

use std::collections::BTreeSet;

use promptframe_core::model::{BlockNode, Document};
use promptframe_registry::{Framework, Registry, SectionKey};

use crate::parse::parse_block;

/// The run of blocks belonging to one section.
///
/// `body_nodes[0]` is always the label line.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'d> {
    pub section_key: SectionKey,
    pub start_index: usize,
    /// Exclusive.
    pub end_index: usize,
    pub body_nodes: &'d [BlockNode],
}

/// Segments of `framework` in document order, first occurrence per key only.
///
/// A later label line for a key that already has a segment still ends the
/// previous segment, but its own run is left out; callers treat those blocks
/// as content outside any section.
pub fn extract_segments<'d>(
    registry: &Registry,
    document: &'d Document,
    framework: &Framework,
) -> Vec<Segment<'d>> {
    let mut seen = BTreeSet::new();
    let segments: Vec<Segment<'d>> = extract_all_segments(registry, document, framework)
        .into_iter()
        .filter(|s| seen.insert(s.section_key.clone()))
        .collect();

    tracing::debug!(
        framework = %framework.id,
        segments = segments.len(),
        "extracted framework segments"
    );
    segments
}

/// Every segment of `framework`, duplicates included.
pub fn extract_all_segments<'d>(
    registry: &Registry,
    document: &'d Document,
    framework: &Framework,
) -> Vec<Segment<'d>> {
    let blocks = &document.blocks;
    let mut segments = Vec::new();
    let mut index = 0;

    while index < blocks.len() {
        let Some(section_key) = framework_key_at(registry, &blocks[index], framework) else {
            index += 1;
            continue;
        };

        let mut end_index = index + 1;
        while end_index < blocks.len()
            && framework_key_at(registry, &blocks[end_index], framework).is_none()
        {
            end_index += 1;
        }

        segments.push(Segment {
            section_key,
            start_index: index,
            end_index,
            body_nodes: &blocks[index..end_index],
        });
        index = end_index;
    }

    segments
}

/// Key of the framework section whose label starts this block, if any.
fn framework_key_at(
    registry: &Registry,
    node: &BlockNode,
    framework: &Framework,
) -> Option<SectionKey> {
    let parsed = parse_block(registry, node)?;
    framework
        .section_by_label(&parsed.definition.normalized_label)
        .map(|s| s.section_key.clone())
}
