//! Label text helpers shared by the registry and the line parser.

/// Normalize display text for label comparison.
///
/// Non-breaking spaces count as spaces, surrounding whitespace is dropped and
/// the result is lowercased. Internal whitespace is kept as-is.
pub fn normalize_label(value: &str) -> String {
    value.replace('\u{00A0}', " ").trim().to_lowercase()
}

/// Title-case a label for checklist display.
///
/// `OBJECTIVE / SUCCESS CRITERIA` becomes `Objective / Success Criteria`.
pub fn format_checklist_label(label: &str) -> String {
    let lowered = label.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut at_word_start = true;

    for c in lowered.chars() {
        if at_word_start && c.is_ascii_lowercase() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace() || c == '/';
    }

    out
}

/// Confirmation text shown before a section with content is dropped.
pub fn removal_prompt(section_key: &str) -> String {
    format!(
        "Remove {} section and delete its content?",
        section_key.replace('_', " ").to_uppercase()
    )
}
