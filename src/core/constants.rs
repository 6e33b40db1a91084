//! Constants used throughout vaultgrep.
//!
//! Centralizes magic strings and tuning values.

/// Marker on the first line of every Ansible Vault file.
pub const VAULT_MARKER: &str = "$ANSIBLE_VAULT";

/// Upper bound on bytes read while looking for the first line of a file.
pub const MAX_HEADER_LEN: u64 = 4096;

/// Directory names never descended into.
pub const DEFAULT_EXCLUDES: &[&str] = &[".git"];

/// Project configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = ".vaultgrep.toml";

/// User configuration file relative to the platform config directory.
pub const USER_CONFIG_FILE: &str = "vaultgrep/config.toml";

/// Ansible configuration file name.
pub const ANSIBLE_CFG: &str = "ansible.cfg";

/// Ansible configuration file relative to HOME.
pub const ANSIBLE_USER_CFG: &str = ".ansible.cfg";

/// System-wide Ansible configuration, consulted last.
#[cfg(unix)]
pub const ANSIBLE_SYSTEM_CFG: &str = "/etc/ansible/ansible.cfg";

/// Environment variable pointing at an explicit ansible.cfg.
pub const ANSIBLE_CONFIG_ENV: &str = "ANSIBLE_CONFIG";

/// Environment variable naming the vault password file.
pub const PASSWORD_FILE_ENV: &str = "ANSIBLE_VAULT_PASSWORD_FILE";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "VAULTGREP_LOG";

/// Paths handed to the worker pool per batch, per worker.
pub const BATCH_FACTOR: usize = 4;
