mod common;

use std::cell::RefCell;

use common::{doc, framework, keys, lines};
use promptframe_core::model::{BlockNode, Document, InlineRun, Mark, TextLine};
use promptframe_engine::{
    AlwaysConfirm, ApplyMode, NeverConfirm, apply_framework, reconcile, section_body_text,
};
use promptframe_registry::{Registry, SectionKey};

#[test]
fn preserves_section_text_and_free_content() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let initial = doc(&[
        "Keep this standalone paragraph",
        "CONTEXT: dataset and operations",
        "TASK: summarize output",
    ]);

    let result = reconcile(
        &registry,
        &initial,
        basic,
        &keys(&["task", "context"]),
        &mut AlwaysConfirm,
    );

    assert!(result.applied);
    assert_eq!(
        lines(&result.document),
        vec![
            "TASK: summarize output",
            "CONTEXT: dataset and operations",
            "Keep this standalone paragraph",
        ]
    );
    assert_eq!(result.report.op, "reconcile");
    assert_eq!(result.report.kept, keys(&["task", "context"]));
    assert!(result.report.added.is_empty());
}

#[test]
fn declined_removal_returns_input_untouched() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let initial = doc(&["TASK: write a summary", "CONSTRAINTS: do not skip tests"]);

    let result = reconcile(&registry, &initial, basic, &keys(&["task"]), &mut NeverConfirm);

    assert!(!result.applied);
    assert_eq!(result.document, initial);
    assert_eq!(result.report.declined, Some(SectionKey::new("constraints")));
    assert!(!result.report.changed());
}

#[test]
fn abort_is_all_or_nothing_across_sections() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let initial = doc(&["TASK: one", "CONTEXT: two", "OUTPUT: three"]);
    let asked = RefCell::new(Vec::new());

    // Approve the first removal, refuse the second.
    let result = reconcile(
        &registry,
        &initial,
        basic,
        &keys(&["task"]),
        &mut |key: &SectionKey| {
            asked.borrow_mut().push(key.as_str().to_string());
            asked.borrow().len() < 2
        },
    );

    assert!(!result.applied);
    assert_eq!(result.document, initial);
    assert_eq!(*asked.borrow(), vec!["context", "output_format"]);
}

#[test]
fn empty_sections_are_removed_without_asking() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let initial = doc(&["TASK: keep me", "CONTEXT:   ", "OUTPUT: "]);
    let mut calls = 0;

    let result = reconcile(&registry, &initial, basic, &keys(&["task"]), &mut |_: &SectionKey| {
        calls += 1;
        false
    });

    assert_eq!(calls, 0);
    assert!(result.applied);
    assert_eq!(lines(&result.document), vec!["TASK: keep me"]);
    assert_eq!(result.report.removed, keys(&["context", "output_format"]));
}

#[test]
fn body_text_on_following_lines_needs_confirmation() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let initial = doc(&["TASK: keep", "CONTEXT: ", "details live here"]);

    let result = reconcile(&registry, &initial, basic, &keys(&["task"]), &mut NeverConfirm);
    assert!(!result.applied);
    assert_eq!(result.report.confirmations, keys(&["context"]));
}

#[test]
fn output_follows_framework_order_not_caller_order() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");

    let result = reconcile(
        &registry,
        &Document::empty(),
        basic,
        &keys(&["constraints", "context", "task"]),
        &mut AlwaysConfirm,
    );

    assert_eq!(
        lines(&result.document),
        vec!["TASK: ", "CONTEXT: ", "CONSTRAINTS: ", ""]
    );
    assert_eq!(result.report.added, keys(&["task", "context", "constraints"]));
}

#[test]
fn unchanged_selection_preserves_everything() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let bold_line = BlockNode::TextLine(TextLine {
        runs: vec![
            InlineRun::text("CONTEXT: "),
            InlineRun {
                kind: "text".to_string(),
                text: "important".to_string(),
                marks: vec![Mark {
                    kind: "bold".to_string(),
                    attrs: None,
                }],
                attrs: None,
            },
        ],
        attrs: None,
    });
    let initial = Document::new(vec![
        BlockNode::paragraph("TASK: summarize"),
        BlockNode::paragraph("second task line"),
        bold_line,
        BlockNode::paragraph("trailing context"),
    ]);

    let result = reconcile(
        &registry,
        &initial,
        basic,
        &keys(&["task", "context"]),
        &mut NeverConfirm,
    );

    assert!(result.applied);
    assert_eq!(result.document, initial);
    assert!(!result.report.changed());
}

#[test]
fn relabels_first_line_for_the_framework() {
    let registry = Registry::builtin();
    let standard = framework(&registry, "standard");
    // OUTPUT is Basic's label. Standard calls that key OUTPUT FORMAT, so the
    // OUTPUT line is just more TASK body here.
    let initial = doc(&["task:   lowercase label", "OUTPUT: bullets"]);

    let result = reconcile(
        &registry,
        &initial,
        standard,
        &keys(&["task", "output_format"]),
        &mut AlwaysConfirm,
    );

    assert_eq!(
        lines(&result.document),
        vec!["TASK: lowercase label", "OUTPUT: bullets", "OUTPUT FORMAT: "]
    );
}

#[test]
fn duplicate_label_is_kept_as_other_content() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let initial = doc(&["TASK: first", "TASK: second", "CONTEXT: ctx"]);

    let result = reconcile(
        &registry,
        &initial,
        basic,
        &keys(&["task", "context"]),
        &mut NeverConfirm,
    );

    assert!(result.applied);
    assert_eq!(
        lines(&result.document),
        vec!["TASK: first", "CONTEXT: ctx", "TASK: second"]
    );
}

#[test]
fn apply_then_reconcile_is_stable() {
    let registry = Registry::builtin();
    let advanced = framework(&registry, "advanced");
    let desired = registry.default_enabled_keys(advanced);

    let applied = apply_framework(
        &registry,
        &Document::empty(),
        advanced,
        &desired,
        ApplyMode::Replace,
    );
    let result = reconcile(&registry, &applied, advanced, &desired, &mut NeverConfirm);

    assert!(result.applied);
    assert_eq!(result.document, applied);
    assert_eq!(result.report.kept.len(), desired.len());
}

#[test]
fn empty_result_becomes_single_empty_paragraph() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let initial = doc(&["TASK: "]);

    let result = reconcile(&registry, &initial, basic, &[], &mut NeverConfirm);
    assert!(result.applied);
    assert_eq!(result.document, Document::empty());
}

#[test]
fn apply_modes() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let existing = doc(&["Existing body"]);

    let replaced = apply_framework(
        &registry,
        &existing,
        basic,
        &keys(&["context", "task"]),
        ApplyMode::Replace,
    );
    assert_eq!(lines(&replaced), vec!["TASK: ", "CONTEXT: "]);

    let merged = apply_framework(
        &registry,
        &existing,
        basic,
        &keys(&["context", "task"]),
        ApplyMode::InsertTop,
    );
    assert_eq!(lines(&merged), vec!["TASK: ", "CONTEXT: ", "Existing body"]);

    let nothing = apply_framework(&registry, &existing, basic, &[], ApplyMode::Replace);
    assert_eq!(nothing, Document::empty());

    assert_eq!("insert-top".parse::<ApplyMode>(), Ok(ApplyMode::InsertTop));
    assert_eq!("insertTop".parse::<ApplyMode>(), Ok(ApplyMode::InsertTop));
    assert!("sideways".parse::<ApplyMode>().is_err());
}

#[test]
fn body_text_joins_remainder_and_following_lines() {
    let registry = Registry::builtin();
    let nodes = vec![
        BlockNode::paragraph("CONTEXT:  first"),
        BlockNode::paragraph("second"),
        BlockNode::empty_paragraph(),
    ];
    assert_eq!(section_body_text(&registry, &nodes), "first\nsecond");
}

#[test]
fn report_serializes_without_empty_fields() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let result = reconcile(
        &registry,
        &doc(&["TASK: x"]),
        basic,
        &keys(&["task"]),
        &mut AlwaysConfirm,
    );

    let value = serde_json::to_value(&result.report).unwrap();
    assert_eq!(value["op"], "reconcile");
    assert_eq!(value["applied"], true);
    assert_eq!(value["framework"], "basic");
    assert_eq!(value["kept"], serde_json::json!(["task"]));
    assert!(value.get("added").is_none());
    assert!(value.get("declined").is_none());
}

#[test]
fn dropped_section_takes_its_repeats_with_one_confirmation() {
    let registry = Registry::builtin();
    let basic = framework(&registry, "basic");
    let initial = doc(&["TASK: t", "CONTEXT: ", "note", "CONTEXT: again"]);
    let mut asked = Vec::new();

    let result = reconcile(&registry, &initial, basic, &keys(&["task"]), &mut |key: &SectionKey| {
        asked.push(key.clone());
        true
    });

    assert!(result.applied);
    assert_eq!(asked, keys(&["context"]));
    assert_eq!(lines(&result.document), vec!["TASK: t"]);
    assert_eq!(result.report.removed, keys(&["context"]));
}
