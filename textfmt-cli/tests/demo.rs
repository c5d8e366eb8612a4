use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn demo_prints_every_format() {
    let mut cmd = cargo_bin_cmd!("textfmt");
    cmd.args(["demo", "-", "--from", "markdown"]).write_stdin("*hi*");
    cmd.assert().success().stdout(predicate::eq(
        "--- html ---\n<p><em>hi</em></p>\n\n\n\
         --- plaintext ---\nhi\n\n\
         --- bbcode ---\n[i]hi[/i]\n\n\
         --- markdown ---\n*hi*\n\n\
         --- cf ---\n''hi''\n\n\
         --- discord ---\n*hi*\n\n",
    ));
}

#[test]
fn demo_json() {
    let mut cmd = cargo_bin_cmd!("textfmt");
    cmd.args(["demo", "-", "--from", "bbcode", "--json"])
        .write_stdin("[b]x[/b]");
    let output = cmd.assert().success().get_output().stdout.clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["markdown"], "**x**");
    assert_eq!(value["cf"], "'''x'''");
    assert_eq!(value["plaintext"], "x");
}
