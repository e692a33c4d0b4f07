use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn block_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write block");
    file
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn colorize_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.arg("colorize").arg("-").write_stdin("?? newfile.txt\n");

    cmd.assert()
        .success()
        .stdout("\u{1b}[31m?? newfile.txt\u{1b}[0m\n");
}

#[test]
fn colorize_leaves_other_languages_alone() {
    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.args(["colorize", "-", "--lang", "rust"])
        .write_stdin("fatal: not a git repository\n");

    cmd.assert()
        .success()
        .stdout("fatal: not a git repository\n");
}

#[test]
fn colorize_uses_configured_palette() {
    let config = config_file("[palette]\ndanger = \"91\"\n");
    let block = block_file("fatal: not a git repository\n");

    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.arg("--config")
        .arg(config.path())
        .arg("colorize")
        .arg(block.path());

    cmd.assert()
        .success()
        .stdout("\u{1b}[91mfatal: not a git repository\u{1b}[0m\n");
}

#[test]
fn detect_prints_shape_name() {
    let block = block_file("diff --git a/x b/x\n@@ -1 +1 @@\n-old\n+new\n");
    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.arg("detect").arg(block.path());

    cmd.assert().success().stdout("diff\n");
}

#[test]
fn detect_all_lists_every_match() {
    let block = block_file(
        "Bisecting: 0 revisions left to test after this\ncommit a4f9c2d8e1b7\n",
    );
    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.args(["detect", "--all"]).arg(block.path());

    cmd.assert().success().stdout("bisect\nlog\n");
}

#[test]
fn detect_reports_none_for_prose() {
    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.args(["detect", "-"]).write_stdin("Just some words.\n");

    cmd.assert().success().stdout("none\n");
}

#[test]
fn grammar_is_json() {
    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.arg("grammar");

    let output_pred = predicate::str::contains("\"scopeName\":\"source.git-bash\"")
        .and(predicate::str::contains("\"include\":\"#scaffolding\""))
        .and(predicate::str::contains("gitbash.path-staged"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn shapes_lists_dispatch_order() {
    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.arg("shapes");

    let output_pred = predicate::str::starts_with("diff\nstatus-long\nstatus-short\n")
        .and(predicate::str::contains("merge (also: transport-error)"))
        .and(predicate::str::contains("bisect (also: log, transport-error)"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.args(["colorize", "/nonexistent/block.txt"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn unknown_palette_token_fails() {
    let config = config_file("[palette]\nchartreuse = \"92\"\n");
    let mut cmd = cargo_bin_cmd!("gitpaint");
    cmd.arg("--config")
        .arg(config.path())
        .args(["colorize", "-"])
        .write_stdin("fatal: x\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown color token: chartreuse"));
}
