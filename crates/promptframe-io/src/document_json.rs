//! Parsing editor document JSON into a [`Document`] with readable errors.
//!
//! Two shapes are accepted: the editor's root node
//! `{"type": "doc", "content": [...]}` and a bare array of block nodes.
//! A document with no blocks becomes a single empty paragraph.

use promptframe_core::model::Document;
use promptframe_json::convert::{ConvertError, from_document, to_document};
use promptframe_json::schema::{DOC_TYPE, JsonNode};
use promptframe_json::serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum DocumentJsonError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error(
        "Invalid document JSON: expected a {{\"type\": \"doc\", \"content\": [...]}} object or an array of blocks, found {found}."
    )]
    UnexpectedRoot { found: &'static str },
    #[error("Invalid document JSON: root node type is '{0}', expected 'doc'.")]
    WrongRootType(String),
    #[error("Invalid document JSON shape: {0}")]
    InvalidShape(#[source] serde_json::Error),
    #[error("Invalid document JSON: {0}")]
    Convert(#[from] ConvertError),
}

/// Parse editor document JSON.
pub fn parse_document_json_str(s: &str) -> Result<Document, DocumentJsonError> {
    let value: Value = serde_json::from_str(s).map_err(DocumentJsonError::InvalidJson)?;

    let content: Vec<JsonNode> = match value {
        Value::Array(_) => serde_json::from_value(value).map_err(DocumentJsonError::InvalidShape)?,
        Value::Object(_) => {
            let root: JsonNode =
                serde_json::from_value(value).map_err(DocumentJsonError::InvalidShape)?;
            match root.kind() {
                Some(DOC_TYPE) | None => {}
                Some(other) => return Err(DocumentJsonError::WrongRootType(other.to_string())),
            }
            root.content.unwrap_or_default()
        }
        other => {
            return Err(DocumentJsonError::UnexpectedRoot {
                found: json_type_name(&other),
            });
        }
    };

    Ok(to_document(&content)?.or_empty())
}

/// Serialize a document as editor JSON, pretty or minified.
pub fn document_to_json_string(doc: &Document, pretty: bool) -> Result<String, serde_json::Error> {
    let root = from_document(doc);
    if pretty {
        serialize::to_pretty_json(&root)
    } else {
        serialize::to_minified_json(&root)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
