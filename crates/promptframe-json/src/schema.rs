use promptframe_core::model::{Attrs, Mark};
use serde::{Deserialize, Serialize};

/// Node type of the editor's root.
pub const DOC_TYPE: &str = "doc";

/// One node of the editor's JSON tree.
///
/// The same shape is used for the root (`"doc"`), blocks and inline nodes.
/// Every field is optional on the wire; [`crate::convert`] decides what a
/// node must carry depending on where it sits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<JsonNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
}

impl JsonNode {
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Text runs and inline atoms such as `hardBreak`.
    pub fn is_inline(&self) -> bool {
        self.text.is_some() || matches!(self.kind(), Some("text" | "hardBreak"))
    }
}
