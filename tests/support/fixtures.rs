//! Test fixtures and constants.

/// Password every fixture vault is encrypted with.
pub const PASSWORD: &str = "correct horse battery staple";

/// A password that does not open the fixtures.
pub const WRONG_PASSWORD: &str = "Tr0ub4dor&3";

/// Name of the password file inside the temp home.
pub const PASSWORD_FILE: &str = "vault-pass.txt";

/// Typical group_vars vault.
pub const GROUP_VARS: &str = "\
---
vault_db_host: db01.internal
vault_db_user: user_001
vault_db_password: s3cr3t
vault_api_token: tok_9f8e7d
";

/// Host vars sharing a line with [`GROUP_VARS`].
pub const HOST_VARS: &str = "\
---
vault_db_user: user_001
vault_ssh_key_id: key-2024-01
";

/// Prebuilt vault fixture, password `secret`.
pub const HELLO_VAULT: &str = include_str!("../fixtures/hello.vault");
