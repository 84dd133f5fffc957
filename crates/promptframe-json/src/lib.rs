#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of promptframe.

Do NOT depend on this crate directly.
Use `promptframe-io` instead.
"#]

pub mod schema;
pub mod convert;
pub mod serialize;

pub use convert::{ConvertError, from_document, to_document};
pub use schema::JsonNode;
