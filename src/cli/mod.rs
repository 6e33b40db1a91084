//! Command-line interface.

pub mod completions;
pub mod output;
pub mod search;

use std::path::PathBuf;

use clap::Parser;

use crate::core::report::CancelToken;
use crate::error::Result;

/// vaultgrep - grep through Ansible Vault encrypted files.
#[derive(Parser, Debug)]
#[command(
    name = "vaultgrep",
    about = "Search the contents of Ansible Vault encrypted files",
    version,
    after_help = "Examples:\n  vaultgrep db_password\n  vaultgrep 'user_00[1-3]|admin' group_vars/all\n  vaultgrep -F 10.0.0.1 host_vars/web01"
)]
pub struct Cli {
    /// Regular expression to search for
    #[arg(required_unless_present = "completions")]
    pub pattern: Option<String>,

    /// Directory to search (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// File holding the vault password, or an executable printing it
    #[arg(long, env = "ANSIBLE_VAULT_PASSWORD_FILE", value_name = "FILE")]
    pub vault_password_file: Option<PathBuf>,

    /// Skip directories with this name (repeatable; .git is always skipped)
    #[arg(short, long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Number of files decrypted in parallel
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Match case-insensitively
    #[arg(short, long)]
    pub ignore_case: bool,

    /// Treat the pattern as a literal string
    #[arg(short = 'F', long)]
    pub fixed_strings: bool,

    /// Read settings from this file instead of .vaultgrep.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute the parsed command line, returning the process exit code.
pub fn execute(cli: Cli, cancel: CancelToken) -> Result<i32> {
    if let Some(shell) = cli.completions {
        completions::execute(shell)?;
        return Ok(0);
    }

    search::execute(&cli, cancel)
}
