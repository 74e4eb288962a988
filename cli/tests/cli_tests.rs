//! End-to-end tests for the trel binary
//!
//! These drive the compiled binary with a scrubbed environment; no test
//! talks to the real Trello API.

use assert_cmd::Command;
use predicates::prelude::*;

fn trel() -> Command {
    let mut cmd = Command::cargo_bin("trel").unwrap();
    cmd.env_remove("TRELLO_API_KEY")
        .env_remove("TRELLO_TOKEN")
        .env_remove("TRELLO_AUTH_SCOPE")
        .env_remove("TRELLO_API_BASE_URL");
    cmd
}

#[test]
fn help_lists_the_commands() {
    trel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("manage"))
        .stdout(predicate::str::contains("auth"));
}

#[test]
fn fetch_without_api_key_fails_with_instructions() {
    trel()
        .args(["fetch", "abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRELLO_API_KEY"));
}

#[test]
fn fetch_without_token_prints_auth_url_and_exits_2() {
    trel()
        .env("TRELLO_API_KEY", "test-key")
        .args(["fetch", "abc123"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("key=test-key"))
        .stdout(predicate::str::contains("scope=read%2Cwrite"));
}

#[test]
fn fetch_rejects_a_zero_actions_limit() {
    trel()
        .env("TRELLO_API_KEY", "test-key")
        .env("TRELLO_TOKEN", "test-token")
        .args(["fetch", "abc123", "--actions-limit", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn auth_url_prints_the_authorization_link() {
    trel()
        .env("TRELLO_API_KEY", "test-key")
        .args(["auth", "url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://trello.com/1/authorize?"))
        .stdout(predicate::str::contains("response_type=token"))
        .stdout(predicate::str::contains("expiration=never"));
}

#[test]
fn auth_url_without_key_fails() {
    trel()
        .args(["auth", "url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TRELLO_API_KEY"));
}

#[test]
fn auth_status_reports_unconfigured_key() {
    trel()
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TRELLO_API_KEY"));
}

#[test]
fn create_requires_board_list_and_name() {
    trel()
        .arg("create")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--board"));
}

#[test]
fn manage_requires_an_action() {
    trel()
        .env("TRELLO_API_KEY", "test-key")
        .env("TRELLO_TOKEN", "test-token")
        .args(["manage", "--card", "abc123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one action"));
}
