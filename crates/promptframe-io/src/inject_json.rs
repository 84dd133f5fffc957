//! Injection item lists: `[{"target": "CONTEXT", "text": "..."}]`.

use promptframe_engine::InjectItem;

#[derive(Debug, thiserror::Error)]
pub enum InjectItemsJsonError {
    #[error("Invalid inject items JSON: {0}. Expected an array of {{\"target\", \"text\"}} objects.")]
    InvalidJson(#[source] serde_json::Error),
}

pub fn parse_inject_items_json_str(s: &str) -> Result<Vec<InjectItem>, InjectItemsJsonError> {
    serde_json::from_str(s).map_err(InjectItemsJsonError::InvalidJson)
}

/// Parse a `TARGET=TEXT` command-line item. The target is trimmed; the text is
/// kept as given and trimmed later by the injector.
pub fn parse_inject_item_arg(arg: &str) -> Option<InjectItem> {
    let (target, text) = arg.split_once('=')?;
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    Some(InjectItem::new(target, text))
}
