#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use promptframe_io::prelude::parse_document_json_str;

pub fn fixture(name: &str) -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join(name)
}

pub fn fixture_arg(name: &str) -> String {
    fixture(name).to_str().unwrap().to_string()
}

/// A fresh path under the system temp dir.
pub fn temp_path(stem: &str) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("promptframe_{stem}_{pid}_{nanos}.json"))
}

/// Flattened block texts of a document printed as JSON.
pub fn document_lines(json: &[u8]) -> Vec<String> {
    let s = String::from_utf8(json.to_vec()).unwrap();
    parse_document_json_str(&s).expect("cli output must be document JSON").lines()
}
