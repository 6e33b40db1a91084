//! Vault password acquisition.
//!
//! The password is resolved once per run and handed to the reporter as an
//! explicit [`VaultSecret`]. It lives in zeroizing memory and never shows up
//! in `Debug` output or logs.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use console::Term;
use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{Result, SecretError};

/// Password used to decrypt every vault file of a run.
pub struct VaultSecret(Zeroizing<Vec<u8>>);

impl VaultSecret {
    /// Wrap raw password bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Borrow the password bytes.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for VaultSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultSecret(***)")
    }
}

/// Where the password comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// A password file, or an executable that prints the password.
    File(PathBuf),
    /// Interactive hidden prompt on the terminal.
    Prompt,
}

/// Resolve the vault password.
///
/// An executable password file is run and its stdout is the password, the
/// same convention `ansible-vault` uses. Surrounding whitespace is stripped.
///
/// # Errors
///
/// Returns `SecretError` if the file cannot be read, the script fails, the
/// prompt cannot be shown, or the resulting password is empty.
pub fn acquire_secret(source: &SecretSource) -> Result<VaultSecret> {
    let raw = match source {
        SecretSource::File(path) if is_executable(path) => {
            debug!(path = %path.display(), "running vault password script");
            from_script(path)?
        }
        SecretSource::File(path) => {
            debug!(path = %path.display(), "reading vault password file");
            Zeroizing::new(fs::read(path).map_err(|source| SecretError::ReadFailed {
                path: path.clone(),
                source,
            })?)
        }
        SecretSource::Prompt => from_prompt()?,
    };

    let trimmed = trim(&raw);
    if trimmed.is_empty() {
        return Err(SecretError::Empty.into());
    }
    Ok(VaultSecret::new(trimmed.to_vec()))
}

fn from_script(path: &Path) -> std::result::Result<Zeroizing<Vec<u8>>, SecretError> {
    let output = Command::new(path)
        .output()
        .map_err(|e| SecretError::ScriptFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SecretError::ScriptFailed {
            path: path.to_path_buf(),
            reason: match stderr.trim() {
                "" => output.status.to_string(),
                msg => msg.to_string(),
            },
        });
    }

    Ok(Zeroizing::new(output.stdout))
}

fn from_prompt() -> std::result::Result<Zeroizing<Vec<u8>>, SecretError> {
    let password = Password::new()
        .with_prompt("Vault password")
        .allow_empty_password(true)
        .interact_on(&Term::stderr())
        .map_err(|e| SecretError::PromptFailed(e.to_string()))?;
    Ok(Zeroizing::new(password.into_bytes()))
}

fn trim(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    false
}
