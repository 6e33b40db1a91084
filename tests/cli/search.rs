//! Tests for searching vault trees.

use crate::support::*;

#[test]
fn test_reports_file_and_matching_line() {
    let t = Test::new();
    let path = t.vault("group_vars/all/vault.yml", "user_001 is an admin\nother line");

    let output = t.search(&["user_001"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        format!("{}\n  user_001 is an admin\n\n", shown(&path))
    );
    assert_stdout_excludes(&output, "other line");
}

#[test]
fn test_relative_root_argument() {
    let t = Test::new();
    t.vault("inventory/group_vars/all/vault.yml", GROUP_VARS);
    t.vault("elsewhere/vault.yml", GROUP_VARS);

    let output = t.search(&["db01", "inventory"]);
    assert_success(&output);
    assert_stdout_contains(&output, "inventory/group_vars/all/vault.yml\n");
    assert_stdout_excludes(&output, "elsewhere");
}

#[test]
fn test_leading_whitespace_stripped() {
    let t = Test::new();
    t.vault("vault.yml", "db:\n    password: hunter2\n");

    let output = t.search(&["hunter2"]);
    assert_success(&output);
    assert_stdout_contains(&output, "\n  password: hunter2\n");
}

#[test]
fn test_plaintext_files_are_ignored() {
    let t = Test::new();
    t.plain("group_vars/all/vars.yml", "db_user: user_001\n");

    let output = t.search(&["user_001"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "No matches found for pattern: user_001\n");
}

#[test]
fn test_no_matches_exits_zero() {
    let t = Test::new();
    t.vault("vault.yml", GROUP_VARS);

    let output = t.search(&["nothing-like-this"]);
    assert_exit_code(&output, 0);
    assert_stdout_contains(&output, "No matches found for pattern: nothing-like-this");
}

#[test]
fn test_git_directory_never_searched() {
    let t = Test::new();
    t.vault(".git/vault.yml", GROUP_VARS);
    t.vault("roles/app/.git/vault.yml", GROUP_VARS);

    let output = t.search(&["db01"]);
    assert_success(&output);
    assert_stdout_excludes(&output, ".git");
    assert_stdout_contains(&output, "No matches found");
}

#[test]
fn test_exclude_flag() {
    let t = Test::new();
    t.vault("vendor/vault.yml", GROUP_VARS);
    t.vault("inventory/vault.yml", GROUP_VARS);

    let output = t.search(&["db01", "--exclude", "vendor"]);
    assert_success(&output);
    assert_stdout_contains(&output, "inventory/vault.yml");
    assert_stdout_excludes(&output, "vendor");
}

#[test]
fn test_each_file_reports_its_own_block() {
    let t = Test::new();
    let group = t.vault("group_vars/all/vault.yml", GROUP_VARS);
    let host = t.vault("host_vars/web01/vault.yml", HOST_VARS);

    let output = t.search(&["user_001"]);
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        format!(
            "{}\n  vault_db_user: user_001\n\n{}\n  vault_db_user: user_001\n\n",
            shown(&group),
            shown(&host)
        )
    );
}

#[test]
fn test_duplicate_lines_reported_once() {
    let t = Test::new();
    t.vault("vault.yml", "role: admin\nrole: admin\nname: x\nrole: admin\n");

    let output = t.search(&["admin"]);
    assert_success(&output);
    assert_eq!(stdout(&output).matches("role: admin").count(), 1);
}

#[test]
fn test_lines_in_first_occurrence_order() {
    let t = Test::new();
    t.vault("vault.yml", "zeta: token\nalpha: token\n");

    let output = t.search(&["token"]);
    let out = stdout(&output);
    let zeta = out.find("zeta").unwrap();
    let alpha = out.find("alpha").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_regex_alternation() {
    let t = Test::new();
    t.vault("vault.yml", GROUP_VARS);

    let output = t.search(&["db_password|api_token"]);
    assert_success(&output);
    assert_stdout_contains(&output, "vault_db_password: s3cr3t");
    assert_stdout_contains(&output, "vault_api_token: tok_9f8e7d");
    assert_stdout_excludes(&output, "vault_db_host");
}

#[test]
fn test_ignore_case() {
    let t = Test::new();
    t.vault("vault.yml", GROUP_VARS);

    let output = t.search(&["-i", "DB01.INTERNAL"]);
    assert_success(&output);
    assert_stdout_contains(&output, "vault_db_host: db01.internal");
}

#[test]
fn test_fixed_strings() {
    let t = Test::new();
    t.vault("vault.yml", "ip: 10.0.0.1\nother: 10a0b0c1\n");

    let output = t.search(&["-F", "10.0.0.1"]);
    assert_success(&output);
    assert_stdout_contains(&output, "ip: 10.0.0.1");
    assert_stdout_excludes(&output, "10a0b0c1");
}

#[test]
fn test_line_anchor() {
    let t = Test::new();
    t.vault("vault.yml", "user: app\npassword: x\n");

    let output = t.search(&["^password"]);
    assert_success(&output);
    assert_stdout_contains(&output, "  password: x\n");
}

#[test]
fn test_many_files_with_single_job() {
    let t = Test::new();
    for i in 0..6 {
        t.vault(&format!("hosts/h{}/vault.yml", i), &format!("host_id: {}\n", i));
    }

    let output = t.search(&["host_id", "--jobs", "1"]);
    assert_success(&output);
    let out = stdout(&output);
    for i in 0..6 {
        assert!(out.contains(&format!("host_id: {}", i)));
    }
    let positions: Vec<_> = (0..6)
        .map(|i| out.find(&format!("hosts/h{}/vault.yml", i)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_prebuilt_fixture() {
    let t = Test::new();
    t.plain("hello.vault", HELLO_VAULT);
    std::fs::write(t.password_file(), "secret\n").unwrap();

    let output = t.search(&["user_001"]);
    assert_success(&output);
    assert_stdout_contains(&output, "  user_001 is an admin\n");
}

#[test]
fn test_vault_id_header_accepted() {
    let t = Test::new();
    let path = t.vault("vault.yml", "token: abc\n");
    let relabeled = std::fs::read_to_string(&path)
        .unwrap()
        .replacen("$ANSIBLE_VAULT;1.1;AES256", "$ANSIBLE_VAULT;1.2;AES256;prod", 1);
    std::fs::write(&path, relabeled).unwrap();

    let output = t.search(&["token"]);
    assert_success(&output);
    assert_stdout_contains(&output, "token: abc");
}
