use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const PAGE: &str = "<html><body><h1>Intro</h1><p>Hello <b>world</b></p>\
<ul><li>one</li><li>two</li></ul></body></html>";

#[test]
fn inspect_defaults_to_treeviz() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("page.html");
    fs::write(&input, PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("weave");
    cmd.current_dir(dir.path()).arg("inspect").arg(&input);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Document"))
        .stdout(predicate::str::contains("├─").or(predicate::str::contains("└─")));
}

#[test]
fn inspect_events_prints_trace() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("page.html");
    fs::write(&input, PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("weave");
    cmd.current_dir(dir.path())
        .arg("inspect")
        .arg(&input)
        .arg("events");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("begin_document"))
        .stdout(predicate::str::contains("begin_format(bold)"))
        .stdout(predicate::str::contains(r#"on_word("Hello")"#))
        .stdout(predicate::str::contains("begin_list"));
}

#[test]
fn inspect_json_is_valid_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("page.html");
    fs::write(&input, PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("weave");
    cmd.current_dir(dir.path())
        .arg("inspect")
        .arg(&input)
        .arg("json");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("["))
        .stdout(predicate::str::contains(r#""event": "on_word""#));
}

#[test]
fn inspect_rejects_non_inspection_views() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("page.html");
    fs::write(&input, PAGE).unwrap();

    let mut cmd = cargo_bin_cmd!("weave");
    cmd.current_dir(dir.path())
        .arg("inspect")
        .arg(&input)
        .arg("markdown");

    cmd.assert().failure();
}

#[test]
fn list_formats_shows_registry() {
    let mut cmd = cargo_bin_cmd!("weave");
    cmd.arg("--list-formats");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("html"))
        .stdout(predicate::str::contains("xhtml"))
        .stdout(predicate::str::contains("markdown"))
        .stdout(predicate::str::contains("treeviz"));
}
