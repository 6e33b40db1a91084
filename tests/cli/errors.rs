//! Tests for fatal errors, per-file errors and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("vaultgrep") || out.contains("Usage"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_pattern_is_usage_error() {
    let t = Test::new();

    let output = t.cmd().output().unwrap();
    assert_exit_code(&output, 2);
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_invalid_pattern_fails_before_search() {
    let t = Test::new();
    t.vault("vault.yml", GROUP_VARS);

    let output = t.search(&["user_("]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "invalid regex pattern");
    assert_stderr_contains(&output, "-F");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_missing_root_fails() {
    let t = Test::new();

    let output = t.search(&["x", "no/such/dir"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "path does not exist: no/such/dir");
}

#[test]
fn test_root_must_be_directory() {
    let t = Test::new();
    t.vault("vault.yml", GROUP_VARS);

    let output = t.search(&["x", "vault.yml"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "not a directory");
}

#[test]
fn test_zero_jobs_rejected() {
    let t = Test::new();

    let output = t.search(&["x", "--jobs", "0"]);
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "jobs");
}

#[test]
fn test_wrong_password_reported_per_file() {
    let t = Test::new();
    let path = t.vault_with("group_vars/all/vault.yml", GROUP_VARS, WRONG_PASSWORD);

    let output = t.search(&["db01"]);
    assert_exit_code(&output, 0);
    assert_stderr_contains(&output, &format!("cannot decrypt {}", shown(&path)));
    assert_stderr_contains(&output, "HMAC verification failed");
    assert_stdout_contains(&output, "No matches found");
}

#[test]
fn test_bad_file_does_not_stop_others() {
    let t = Test::new();
    let bad = t.vault_with("a/vault.yml", GROUP_VARS, WRONG_PASSWORD);
    let corrupt = t.plain("b/vault.yml", "$ANSIBLE_VAULT;1.1;AES256\nnot-hex-at-all\n");
    let legacy = t.plain("c/vault.yml", "$ANSIBLE_VAULT;1.0;AES\n0000\n");
    let good = t.vault("d/vault.yml", GROUP_VARS);

    let output = t.search(&["db01"]);
    assert_success(&output);
    assert_stderr_contains(&output, &shown(&bad));
    assert_stderr_contains(&output, &shown(&corrupt));
    assert_stderr_contains(&output, "unsupported vault format");
    assert_stderr_contains(&output, &shown(&legacy));
    assert_stdout_contains(&output, &format!("{}\n  vault_db_host: db01.internal\n", shown(&good)));
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["--completions", "bash"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_vaultgrep") || out.contains("complete"));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    let output = t.cmd().args(["--completions", "zsh"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vaultgrep");
}
