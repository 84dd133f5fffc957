#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of promptframe.

Do NOT depend on this crate directly.
Use `promptframe-io` instead.
"#]

pub mod apply;
pub mod inject;
pub mod parse;
pub mod reconcile;
pub mod report;
pub mod segment;
pub mod session;

pub use apply::{ApplyMode, apply_framework};
pub use inject::{InjectItem, InjectOptions, Injected, MissingPlacement, inject};
pub use parse::{MatchedLine, parse_block, parse_line};
pub use reconcile::{
    AlwaysConfirm, NeverConfirm, Reconciled, RemovalConfirmer, reconcile, section_body_text,
};
pub use report::OperationReport;
pub use segment::{Segment, extract_all_segments, extract_segments};
pub use session::{ApplyDecision, FrameworkSession, PendingApply, SessionError, SessionUpdate};
