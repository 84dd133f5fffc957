use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

mod common;
use common::fixture_arg;

#[test]
fn inspect_lists_sections_and_fingerprint() {
    let prompt = fixture_arg("prompt.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args(["inspect", &prompt, "--framework", "basic"]);

    let out = cmd.assert().success().get_output().stdout.clone();
    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert!(lines[0].starts_with("section_key"));
    assert!(lines[1].starts_with("task") && lines[1].contains("filled"));
    assert!(lines[2].starts_with("context") && lines[2].contains("placeholder"));
    assert!(lines[4].contains("under 200 words"));
    assert_eq!(lines[5], "other blocks: 0");

    let fingerprint = lines[6].strip_prefix("fingerprint: ").unwrap();
    assert_eq!(fingerprint.len(), 16);
}

#[test]
fn inspect_counts_blocks_outside_sections() {
    let doc = fixture_arg("document.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args(["inspect", &doc, "--framework", "standard"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Summarize the report"))
        .stdout(predicate::str::contains("other blocks: 1"));
}

#[test]
fn unknown_framework_names_the_known_ones() {
    let prompt = fixture_arg("prompt.json");

    let mut cmd = cargo_bin_cmd!("promptframe");
    cmd.args(["inspect", &prompt, "--framework", "nope"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown framework 'nope'"))
        .stderr(predicate::str::contains("basic, standard, advanced, developer, workflow"));
}
