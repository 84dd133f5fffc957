//! Writing externally supplied text into named sections.

use serde::{Deserialize, Serialize};

use promptframe_core::model::{BlockNode, Document};
use promptframe_registry::{InjectTarget, Registry, normalize_label};

use crate::parse::parse_block;
use crate::reconcile::section_line;
use crate::report::OperationReport;

/// Text destined for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectItem {
    pub target: InjectTarget,
    pub text: String,
}

impl InjectItem {
    pub fn new(target: impl Into<InjectTarget>, text: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            text: text.into(),
        }
    }
}

/// Where new section lines go when their section is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPlacement {
    /// One block at the front of the document, in item order.
    #[default]
    InputOrder,
    /// Each new line goes to index 0, so the last one processed ends up first.
    Stacked,
}

/// Injection options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectOptions {
    pub missing_placement: MissingPlacement,
}

/// Result of [`inject`].
#[derive(Debug, Clone, PartialEq)]
pub struct Injected {
    pub document: Document,
    pub report: OperationReport,
}

/// Inject `items` into `document`, returning a new document.
///
/// Per item, in order:
/// - section missing: a `"<LABEL>: <text>"` line is added at the front
/// - section line is a placeholder: that line becomes `"<LABEL>: <text>"`
/// - section line has content: `text` becomes a new line after the section
///
/// Labels are resolved across all frameworks. A target the registry does not
/// know is used verbatim as the label. Blank items are dropped.
pub fn inject(
    registry: &Registry,
    document: &Document,
    items: &[InjectItem],
    options: InjectOptions,
) -> Injected {
    let mut report = OperationReport::new("inject", None, document);
    let mut blocks = document.blocks.clone();
    // End of the block of lines created at the front during this call.
    let mut front_end = 0;

    for item in items {
        let text = item.text.trim();
        if text.is_empty() {
            report.count("dropped");
            continue;
        }

        let label = resolve_label(registry, &item.target);
        let wanted = normalize_label(&label);

        let line_index = blocks.iter().position(|node| {
            parse_block(registry, node)
                .is_some_and(|parsed| normalize_label(&parsed.definition.label) == wanted)
        });

        let Some(line_index) = line_index else {
            let at = match options.missing_placement {
                MissingPlacement::InputOrder => front_end,
                MissingPlacement::Stacked => 0,
            };
            blocks.insert(at, section_line(&label, text));
            front_end += 1;
            report.count("created");
            tracing::debug!(target_label = %label, at, "created missing section");
            continue;
        };

        let placeholder = parse_block(registry, &blocks[line_index])
            .is_some_and(|parsed| parsed.is_placeholder());
        if placeholder {
            blocks[line_index] = section_line(&label, text);
            report.count("overwritten");
            continue;
        }

        let at = section_end(registry, &blocks, line_index);
        blocks.insert(at, BlockNode::paragraph(text));
        if at <= front_end {
            front_end += 1;
        }
        report.count("appended");
        tracing::debug!(target_label = %label, at, "appended to occupied section");
    }

    let document = Document::new(blocks).or_empty();
    let report = report.finish(true, &document);
    Injected { document, report }
}

fn resolve_label(registry: &Registry, target: &InjectTarget) -> String {
    registry
        .inject_section_key(target)
        .and_then(|key| registry.lookup_by_section_key(key))
        .map(|definition| definition.label.clone())
        .unwrap_or_else(|| target.as_str().to_string())
}

/// Index just past the section starting at `line_index`: the next block that
/// is a recognized label line, or the end of the document.
fn section_end(registry: &Registry, blocks: &[BlockNode], line_index: usize) -> usize {
    blocks[line_index + 1..]
        .iter()
        .position(|node| parse_block(registry, node).is_some())
        .map(|offset| line_index + 1 + offset)
        .unwrap_or(blocks.len())
}
