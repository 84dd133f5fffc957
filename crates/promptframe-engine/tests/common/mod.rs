#![allow(dead_code)]

use promptframe_core::model::Document;
use promptframe_registry::{Framework, FrameworkId, Registry, SectionKey};

pub fn framework<'r>(registry: &'r Registry, id: &str) -> &'r Framework {
    registry
        .framework(&FrameworkId::new(id))
        .unwrap_or_else(|| panic!("built-in framework '{id}' missing"))
}

pub fn keys(raw: &[&str]) -> Vec<SectionKey> {
    raw.iter().map(|k| SectionKey::new(*k)).collect()
}

pub fn doc(lines: &[&str]) -> Document {
    Document::from_lines(lines.iter().copied())
}

pub fn lines(doc: &Document) -> Vec<String> {
    doc.lines()
}
