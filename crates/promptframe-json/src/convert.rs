//! Lossless mapping between the editor JSON tree and [`Document`].
//!
//! `paragraph` nodes whose children are all inline become [`TextLine`]s.
//! Every other block becomes a [`Container`] that keeps its type tag and
//! attributes; its inline children become runs and its block children are
//! converted recursively. A container's runs are written back before its
//! block children.

use promptframe_core::model::{BlockNode, Container, Document, InlineRun, TextLine};

use crate::schema::{DOC_TYPE, JsonNode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("node at {path} has no \"type\"")]
    MissingType { path: String },
    #[error("inline node at {path} must sit inside a block")]
    InlineAtBlockLevel { path: String },
}

/// Convert top-level block nodes into a [`Document`].
///
/// An empty list stays empty; callers decide whether to substitute
/// [`Document::empty`].
pub fn to_document(content: &[JsonNode]) -> Result<Document, ConvertError> {
    let blocks = content
        .iter()
        .enumerate()
        .map(|(i, node)| to_block(node, &format!("content[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Document::new(blocks))
}

/// Build the editor's `{"type": "doc", "content": [...]}` root.
pub fn from_document(doc: &Document) -> JsonNode {
    JsonNode {
        kind: Some(DOC_TYPE.to_string()),
        content: Some(doc.blocks.iter().map(from_block).collect()),
        ..JsonNode::default()
    }
}

fn to_block(node: &JsonNode, path: &str) -> Result<BlockNode, ConvertError> {
    if node.is_inline() {
        return Err(ConvertError::InlineAtBlockLevel {
            path: path.to_string(),
        });
    }
    let kind = node.kind().ok_or_else(|| ConvertError::MissingType {
        path: path.to_string(),
    })?;

    let children = node.content.as_deref().unwrap_or_default();
    if kind == "paragraph" && children.iter().all(JsonNode::is_inline) {
        let runs = children
            .iter()
            .enumerate()
            .map(|(i, child)| to_run(child, &format!("{path}.content[{i}]")))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(BlockNode::TextLine(TextLine {
            runs,
            attrs: node.attrs.clone(),
        }));
    }

    let mut container = Container {
        kind: kind.to_string(),
        attrs: node.attrs.clone(),
        runs: Vec::new(),
        children: Vec::new(),
    };
    for (i, child) in children.iter().enumerate() {
        let child_path = format!("{path}.content[{i}]");
        if child.is_inline() {
            container.runs.push(to_run(child, &child_path)?);
        } else {
            container.children.push(to_block(child, &child_path)?);
        }
    }
    Ok(BlockNode::Container(container))
}

fn to_run(node: &JsonNode, path: &str) -> Result<InlineRun, ConvertError> {
    let kind = node.kind().ok_or_else(|| ConvertError::MissingType {
        path: path.to_string(),
    })?;
    Ok(InlineRun {
        kind: kind.to_string(),
        text: node.text.clone().unwrap_or_default(),
        marks: node.marks.clone().unwrap_or_default(),
        attrs: node.attrs.clone(),
    })
}

fn from_block(block: &BlockNode) -> JsonNode {
    match block {
        BlockNode::TextLine(line) => JsonNode {
            kind: Some("paragraph".to_string()),
            attrs: line.attrs.clone(),
            content: non_empty(line.runs.iter().map(from_run).collect()),
            ..JsonNode::default()
        },
        BlockNode::Container(container) => {
            let content = container
                .runs
                .iter()
                .map(from_run)
                .chain(container.children.iter().map(from_block))
                .collect();
            JsonNode {
                kind: Some(container.kind.clone()),
                attrs: container.attrs.clone(),
                content: non_empty(content),
                ..JsonNode::default()
            }
        }
    }
}

fn from_run(run: &InlineRun) -> JsonNode {
    let text = (run.kind == "text" || !run.text.is_empty()).then(|| run.text.clone());
    JsonNode {
        kind: Some(run.kind.clone()),
        attrs: run.attrs.clone(),
        content: None,
        text,
        marks: non_empty(run.marks.clone()),
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}
