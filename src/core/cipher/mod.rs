//! Vault file encryption formats.
//!
//! The search pipeline only ever sees the [`Cipher`] trait: raw file bytes
//! in, plaintext bytes out. The format details (key derivation, cipher mode,
//! integrity check) stay behind it.
//!
//! ## Backends
//!
//! - **ansible**: Ansible Vault `1.1`/`1.2` envelopes with the `AES256` cipher.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

mod ansible;

pub use ansible::{parse_header, AnsibleVault, VaultHeader};

use crate::error::CipherError;

/// Encrypted file format.
///
/// Implementations must be shareable across worker threads; a single
/// instance decrypts every file of a run.
pub trait Cipher: Sync {
    /// Key material accepted by this format.
    type Secret: ?Sized + Sync;

    /// Encrypt plaintext into a complete file envelope.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the key material cannot be used.
    fn encrypt(&self, plaintext: &[u8], secret: &Self::Secret) -> Result<Vec<u8>, CipherError>;

    /// Decrypt a complete file envelope.
    ///
    /// # Arguments
    ///
    /// * `raw` - File contents, header included
    /// * `secret` - Key material for this run
    ///
    /// # Errors
    ///
    /// Returns `CipherError` on an unsupported variant, malformed data, or a
    /// failed integrity check (wrong secret).
    fn decrypt(&self, raw: &[u8], secret: &Self::Secret) -> Result<Vec<u8>, CipherError>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}
