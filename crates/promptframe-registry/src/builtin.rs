//! The built-in framework catalog.
//!
//! Rows are `(section_key, label, helper, default_enabled)` in the order the
//! sections are emitted.

use std::collections::BTreeMap;

use crate::{Framework, FrameworkId, InjectTarget, SectionDefinition, SectionKey};

type Row = (&'static str, &'static str, &'static str, bool);

const BASIC: &[Row] = &[
    ("task", "TASK", "What do you want me to do?", true),
    ("context", "CONTEXT", "What background should I use (or assume)?", true),
    (
        "output_format",
        "OUTPUT",
        "How should the answer look? (bullets/table/JSON + length)",
        true,
    ),
    ("constraints", "CONSTRAINTS", "Any must-do / must-avoid rules?", false),
];

const STANDARD: &[Row] = &[
    ("role", "ROLE", "Who should I act as (expert/coach/editor)?", false),
    ("task", "TASK", "What do you want me to produce?", true),
    (
        "context",
        "CONTEXT",
        "Key facts, references, constraints from your world",
        true,
    ),
    ("constraints", "CONSTRAINTS", "Rules: scope, tone, length, do/don’t", true),
    ("output_format", "OUTPUT FORMAT", "Exact structure you want back", true),
    (
        "example",
        "EXAMPLE",
        "One small example of the style/format you want",
        false,
    ),
];

const ADVANCED: &[Row] = &[
    ("role", "ROLE", "What expertise/stance should I take?", true),
    (
        "objective",
        "OBJECTIVE / SUCCESS CRITERIA",
        "What does ‘done well’ mean?",
        true,
    ),
    (
        "context",
        "CONTEXT",
        "Reference material + definitions + key facts",
        true,
    ),
    (
        "inputs",
        "INPUTS",
        "What you’re providing (data, text, requirements)",
        true,
    ),
    ("constraints", "CONSTRAINTS", "Hard rules + boundaries", true),
    ("approach", "APPROACH", "How to tackle the task (steps/checklist)", true),
    ("edge_cases", "EDGE CASES", "What should I watch out for?", false),
    ("examples", "EXAMPLES", "A couple of input→output examples", false),
    ("output_format", "OUTPUT FORMAT", "Required structure/schema", true),
    (
        "verification",
        "VERIFICATION / SELF-CHECK",
        "How to verify quality before finalizing",
        true,
    ),
];

const DEVELOPER: &[Row] = &[
    (
        "system_behavior",
        "SYSTEM BEHAVIOR",
        "Non-negotiable behavior rules (tone, safety, refusal style)",
        true,
    ),
    (
        "task",
        "TASK",
        "What the assistant must do (often variable-driven)",
        true,
    ),
    (
        "input_variables",
        "INPUT VARIABLES",
        "What the user/app will supply (types + examples)",
        true,
    ),
    (
        "context_source_priority",
        "CONTEXT / SOURCE PRIORITY",
        "What to trust first (Vault > user text > general knowledge)",
        true,
    ),
    (
        "constraints",
        "CONSTRAINTS",
        "Hard limits, compliance rules, performance bounds",
        true,
    ),
    (
        "output_contract",
        "OUTPUT CONTRACT",
        "Schema/format the system expects (JSON keys, tables, etc.)",
        true,
    ),
    (
        "error_handling",
        "ERROR HANDLING",
        "What to do when info is missing/ambiguous",
        true,
    ),
    (
        "test_cases",
        "TEST CASES",
        "Example inputs + what ‘good’ output looks like",
        false,
    ),
    (
        "changelog",
        "CHANGELOG",
        "Notes for maintaining the prompt over time",
        false,
    ),
];

const WORKFLOW: &[Row] = &[
    ("role", "ROLE", "What kind of partner should I be?", true),
    ("goal", "GOAL", "What outcome are we trying to reach?", true),
    ("context", "CONTEXT", "Background + constraints + non-goals", true),
    (
        "milestones",
        "MILESTONES",
        "What steps and deliverables should we produce?",
        true,
    ),
    (
        "questions_first_policy",
        "QUESTIONS FIRST POLICY",
        "Ask questions first vs proceed with assumptions",
        true,
    ),
    ("work_plan", "WORK PLAN", "Step-by-step plan before execution", true),
    (
        "deliverable_format",
        "DELIVERABLE FORMAT",
        "What the final output should look like",
        true,
    ),
    ("stop_conditions", "STOP CONDITIONS", "When to stop vs continue", false),
];

const INJECT_TARGETS: &[(&str, &str)] = &[
    ("ROLE", "role"),
    ("CONTEXT", "context"),
    ("CONSTRAINTS", "constraints"),
];

fn framework(id: &str, label: &str, rows: &[Row]) -> Framework {
    Framework {
        id: FrameworkId::new(id),
        label: label.to_string(),
        sections: rows
            .iter()
            .map(|&(key, label, helper, default_enabled)| SectionDefinition {
                section_key: SectionKey::new(key),
                label: label.to_string(),
                helper: helper.to_string(),
                default_enabled,
            })
            .collect(),
    }
}

pub(crate) fn frameworks() -> Vec<Framework> {
    vec![
        framework("basic", "Basic", BASIC),
        framework("standard", "Standard", STANDARD),
        framework("advanced", "Advanced", ADVANCED),
        framework("developer", "Developer", DEVELOPER),
        framework("workflow", "Workflow", WORKFLOW),
    ]
}

pub(crate) fn inject_targets() -> BTreeMap<InjectTarget, SectionKey> {
    INJECT_TARGETS
        .iter()
        .map(|&(target, key)| (InjectTarget::new(target), SectionKey::new(key)))
        .collect()
}
