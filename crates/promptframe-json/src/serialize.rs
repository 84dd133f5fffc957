use crate::schema::JsonNode;

/// Serialize as minified JSON (no whitespace).
pub fn to_minified_json(node: &JsonNode) -> Result<String, serde_json::Error> {
    serde_json::to_string(node)
}

/// Serialize as pretty JSON, the way editors store documents on disk.
pub fn to_pretty_json(node: &JsonNode) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(node)
}
