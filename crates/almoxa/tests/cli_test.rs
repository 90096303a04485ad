// CLI smoke tests: argument parsing and help output only -- nothing
// here talks to a server.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_the_top_level_commands() {
    Command::cargo_bin("almoxa")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tools"))
        .stdout(predicate::str::contains("movements"))
        .stdout(predicate::str::contains("tenants"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn tools_help_shows_subcommands() {
    Command::cargo_bin("almoxa")
        .unwrap()
        .args(["tools", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pre-order"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn movements_entry_requires_an_item_line() {
    Command::cargo_bin("almoxa")
        .unwrap()
        .args(["movements", "entry"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--item"));
}

#[test]
fn completions_generate_without_a_server() {
    Command::cargo_bin("almoxa")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("almoxa"));
}
