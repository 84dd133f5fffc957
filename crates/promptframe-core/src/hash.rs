use xxhash_rust::xxh3::xxh3_64;

use crate::model::{BlockNode, Document};

/// Normalize newlines in block text before hashing.
///
/// CRLF and lone CR both become LF, so a document saved on another platform
/// keeps its fingerprint. Nothing else is touched; trailing whitespace matters
/// here because `"TASK: "` and `"TASK:"` are different lines to the editor.
pub fn canonicalize_text(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

/// xxh3-64 over UTF-8 bytes as fixed-width 16-char lowercase hex.
pub fn xxh64_hex(input: &str) -> String {
    format!("{:016x}", xxh3_64(input.as_bytes()))
}

/// Content fingerprint of a document.
///
/// Payload is one line per block, depth-first: `{depth}\t{kind}\t{text}\n`,
/// where `text` is the block's own inline text. Marks and attributes are
/// not part of the fingerprint.
pub fn fingerprint(doc: &Document) -> String {
    let mut payload = String::new();
    for block in &doc.blocks {
        push_block(&mut payload, block, 0);
    }
    xxh64_hex(&payload)
}

fn push_block(payload: &mut String, block: &BlockNode, depth: usize) {
    payload.push_str(&depth.to_string());
    payload.push('\t');
    payload.push_str(block.kind());
    payload.push('\t');

    match block {
        BlockNode::TextLine(line) => {
            payload.push_str(&canonicalize_text(&line.text()));
            payload.push('\n');
        }
        BlockNode::Container(container) => {
            let own: String = container.runs.iter().map(|r| r.text.as_str()).collect();
            payload.push_str(&canonicalize_text(&own));
            payload.push('\n');
            for child in &container.children {
                push_block(payload, child, depth + 1);
            }
        }
    }
}
