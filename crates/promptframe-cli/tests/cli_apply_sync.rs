use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

mod common;
use common::{document_lines, fixture_arg, temp_path};

const EMPTY_DOC: &str = r#"{"type":"doc","content":[{"type":"paragraph"}]}"#;

#[test]
fn apply_to_empty_document_uses_defaults() {
    let path = temp_path("apply_empty");
    std::fs::write(&path, EMPTY_DOC).unwrap();

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args(["apply", path.to_str().unwrap(), "--framework", "basic"]);

    let out = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(document_lines(&out), vec!["TASK: ", "CONTEXT: ", "OUTPUT: "]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn apply_to_document_with_text_needs_a_mode() {
    let prompt = fixture_arg("prompt.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args(["apply", &prompt, "--framework", "standard"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--mode replace or --mode insert-top"));
}

#[test]
fn apply_insert_top_with_chosen_sections() {
    let prompt = fixture_arg("prompt.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args([
        "apply",
        &prompt,
        "--framework",
        "standard",
        "--sections",
        "example,role",
        "--mode",
        "insert-top",
        "--min",
    ]);

    let out = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 1);
    assert_eq!(
        document_lines(&out),
        vec![
            "ROLE: ",
            "EXAMPLE: ",
            "TASK: Generate a concise summary",
            "CONTEXT: ",
            "OUTPUT: bullet list",
            "CONSTRAINTS: under 200 words",
        ]
    );
}

#[test]
fn apply_rejects_section_outside_framework() {
    let prompt = fixture_arg("prompt.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args([
        "apply",
        &prompt,
        "--framework",
        "basic",
        "--sections",
        "role",
        "--mode",
        "replace",
    ]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("framework 'basic' has no section 'role'"));
}

#[test]
fn sync_with_no_exits_3_on_content_removal() {
    let prompt = fixture_arg("prompt.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args([
        "sync",
        &prompt,
        "--framework",
        "basic",
        "--sections",
        "task,context,output_format",
        "--no",
        "--report",
    ]);

    cmd.assert()
        .failure()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("\"declined\": \"constraints\""))
        .stderr(predicate::str::contains("removal of section 'constraints' was declined"));
}

#[test]
fn sync_with_yes_drops_the_section() {
    let prompt = fixture_arg("prompt.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args([
        "sync",
        &prompt,
        "--framework",
        "basic",
        "--sections",
        "output_format,task,context",
        "--yes",
    ]);

    let out = cmd.assert().success().get_output().stdout.clone();
    assert_eq!(
        document_lines(&out),
        vec![
            "TASK: Generate a concise summary",
            "CONTEXT: ",
            "OUTPUT: bullet list",
        ]
    );
}

#[test]
fn sync_asks_on_stderr_and_reads_stdin() {
    let prompt = fixture_arg("prompt.json");
    let out_path = temp_path("sync_out");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args([
        "sync",
        &prompt,
        "--framework",
        "standard",
        "--sections",
        "task",
        "--out",
        out_path.to_str().unwrap(),
    ]);
    cmd.write_stdin("y\nyes\n");

    // OUTPUT is not a Standard label, so that line belongs to CONTEXT.
    cmd.assert()
        .success()
        .stderr(predicate::str::contains(
            "Remove CONTEXT section and delete its content? [y/N]",
        ))
        .stderr(predicate::str::contains(
            "Remove CONSTRAINTS section and delete its content? [y/N]",
        ));

    let written = std::fs::read(&out_path).unwrap();
    assert_eq!(
        document_lines(&written),
        vec!["TASK: Generate a concise summary"]
    );

    let _ = std::fs::remove_file(&out_path);
}

#[test]
fn sync_treats_anything_but_yes_as_no() {
    let prompt = fixture_arg("prompt.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args([
        "sync",
        &prompt,
        "--framework",
        "basic",
        "--sections",
        "",
    ]);
    cmd.write_stdin("sure\n");

    cmd.assert().failure().code(3);
}

#[test]
fn sync_of_empty_placeholder_does_not_ask() {
    let prompt = fixture_arg("prompt.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args([
        "sync",
        &prompt,
        "--framework",
        "basic",
        "--sections",
        "task,output_format,constraints",
    ]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("[y/N]").not());
}
