#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of promptframe.

Do NOT depend on this crate directly.
Use `promptframe-io` instead.
"#]

pub mod model;
pub mod hash;
