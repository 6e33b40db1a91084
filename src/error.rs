//! Error types for vaultgrep.
//!
//! Errors are grouped by concern. [`SearchError`], [`SecretError`] and
//! [`ConfigError`] end the run; [`CipherError`] is scoped to a single file
//! and is reported without stopping the search.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a search before any file is read.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),
}

/// Errors while resolving the vault password.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("cannot read vault password file {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vault password script {} failed: {reason}", path.display())]
    ScriptFailed { path: PathBuf, reason: String },

    #[error("vault password is empty")]
    Empty,

    #[error("failed to read vault password: {0}")]
    PromptFailed(String),
}

/// Errors decoding or decrypting a single vault file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("missing $ANSIBLE_VAULT header")]
    MissingHeader,

    #[error("unsupported vault format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid vault encoding: {0}")]
    InvalidEncoding(String),

    #[error("HMAC verification failed (wrong password or corrupted file)")]
    IntegrityCheckFailed,

    #[error("invalid padding after decryption")]
    InvalidPadding,

    #[error("invalid key length: {0}")]
    InvalidKeyLength(String),
}

/// Errors loading configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
