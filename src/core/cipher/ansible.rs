//! Ansible Vault `AES256` backend.
//!
//! Envelope layout:
//!
//! ```text
//! $ANSIBLE_VAULT;1.1;AES256
//! <hex(hex(salt) \n hex(hmac) \n hex(ciphertext)), wrapped at 80 columns>
//! ```
//!
//! Keys come from PBKDF2-HMAC-SHA256 over the password and salt. The
//! ciphertext is AES-256-CTR over PKCS#7 padded plaintext, authenticated
//! with HMAC-SHA256.

use aes::Aes256;
use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::core::constants::VAULT_MARKER;
use crate::core::secret::VaultSecret;
use crate::error::CipherError;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;
type HmacSha256 = Hmac<Sha256>;

const KDF_ROUNDS: u32 = 10_000;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const DERIVED_LEN: usize = 2 * KEY_LEN + IV_LEN;
const SALT_LEN: usize = 32;
const BLOCK_LEN: usize = 16;
const LINE_WIDTH: usize = 80;

const SUPPORTED_VERSIONS: &[&str] = &["1.1", "1.2"];
const SUPPORTED_CIPHER: &str = "AES256";

/// Parsed first line of a vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultHeader {
    pub version: String,
    pub cipher: String,
    /// Only present in `1.2` envelopes.
    pub vault_id: Option<String>,
}

/// Parse `$ANSIBLE_VAULT;<version>;<cipher>[;<vault-id>]`.
///
/// # Errors
///
/// Returns `CipherError::MissingHeader` if the marker is absent and
/// `CipherError::UnsupportedFormat` for any version or cipher this backend
/// cannot decrypt.
pub fn parse_header(line: &str) -> Result<VaultHeader, CipherError> {
    let mut fields = line.trim().split(';').map(str::trim);

    if fields.next() != Some(VAULT_MARKER) {
        return Err(CipherError::MissingHeader);
    }

    let version = fields
        .next()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CipherError::UnsupportedFormat("missing version".to_string()))?;
    let cipher = fields
        .next()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| CipherError::UnsupportedFormat("missing cipher".to_string()))?;
    let vault_id = fields.next().filter(|id| !id.is_empty()).map(String::from);

    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(CipherError::UnsupportedFormat(format!("version {}", version)));
    }
    if cipher != SUPPORTED_CIPHER {
        return Err(CipherError::UnsupportedFormat(format!("cipher {}", cipher)));
    }

    Ok(VaultHeader {
        version: version.to_string(),
        cipher: cipher.to_string(),
        vault_id,
    })
}

/// Ansible Vault backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsibleVault;

impl AnsibleVault {
    /// Encrypt with a caller-chosen salt.
    ///
    /// Deterministic for a given salt, which makes it usable for fixtures.
    pub fn encrypt_with_salt(
        &self,
        plaintext: &[u8],
        secret: &VaultSecret,
        salt: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        let keys = derive_keys(secret.expose(), salt);

        let mut data = pad(plaintext);
        keystream(&keys)?.apply_keystream(&mut data);
        let tag = mac(&keys)?.chain_update(&data).finalize().into_bytes();

        let inner = format!(
            "{}\n{}\n{}",
            hex::encode(salt),
            hex::encode(tag),
            hex::encode(&data)
        );
        let body = hex::encode(inner.as_bytes());

        let mut out = format!("{};1.1;{}\n", VAULT_MARKER, SUPPORTED_CIPHER);
        for line in body.as_bytes().chunks(LINE_WIDTH) {
            out.extend(line.iter().map(|&b| char::from(b)));
            out.push('\n');
        }

        trace!(plaintext_len = plaintext.len(), envelope_len = out.len(), "encrypted");
        Ok(out.into_bytes())
    }
}

impl Cipher for AnsibleVault {
    type Secret = VaultSecret;

    fn name(&self) -> &'static str {
        "ansible-vault"
    }

    fn encrypt(&self, plaintext: &[u8], secret: &VaultSecret) -> Result<Vec<u8>, CipherError> {
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        self.encrypt_with_salt(plaintext, secret, &salt)
    }

    fn decrypt(&self, raw: &[u8], secret: &VaultSecret) -> Result<Vec<u8>, CipherError> {
        trace!(envelope_len = raw.len(), "decrypting");

        let text = std::str::from_utf8(raw)
            .map_err(|_| CipherError::InvalidEncoding("envelope is not ASCII".to_string()))?;
        let mut lines = text.lines();
        let header = parse_header(lines.next().ok_or(CipherError::MissingHeader)?)?;
        trace!(version = %header.version, vault_id = ?header.vault_id, "parsed header");

        let body: String = lines.map(str::trim).collect();
        let inner = hex::decode(body.as_bytes())
            .map_err(|e| CipherError::InvalidEncoding(format!("envelope body: {}", e)))?;
        let inner = String::from_utf8(inner)
            .map_err(|_| CipherError::InvalidEncoding("payload is not ASCII".to_string()))?;

        let mut parts = inner.splitn(3, '\n');
        let salt = decode_field(parts.next(), "salt")?;
        let expected = decode_field(parts.next(), "hmac")?;
        let mut data = decode_field(parts.next(), "ciphertext")?;

        let keys = derive_keys(secret.expose(), &salt);
        mac(&keys)?
            .chain_update(&data)
            .verify_slice(&expected)
            .map_err(|_| CipherError::IntegrityCheckFailed)?;

        keystream(&keys)?.apply_keystream(&mut data);
        let plaintext = unpad(data)?;

        trace!(plaintext_len = plaintext.len(), "decrypted");
        Ok(plaintext)
    }
}

fn decode_field(field: Option<&str>, name: &str) -> Result<Vec<u8>, CipherError> {
    let field = field
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .ok_or_else(|| CipherError::InvalidEncoding(format!("missing {}", name)))?;
    hex::decode(field).map_err(|e| CipherError::InvalidEncoding(format!("{}: {}", name, e)))
}

fn derive_keys(password: &[u8], salt: &[u8]) -> Zeroizing<[u8; DERIVED_LEN]> {
    let mut derived = Zeroizing::new([0u8; DERIVED_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, KDF_ROUNDS, &mut derived[..]);
    derived
}

fn keystream(keys: &[u8; DERIVED_LEN]) -> Result<Aes256Ctr, CipherError> {
    Aes256Ctr::new_from_slices(&keys[..KEY_LEN], &keys[2 * KEY_LEN..])
        .map_err(|e| CipherError::InvalidKeyLength(e.to_string()))
}

fn mac(keys: &[u8; DERIVED_LEN]) -> Result<HmacSha256, CipherError> {
    <HmacSha256 as Mac>::new_from_slice(&keys[KEY_LEN..2 * KEY_LEN])
        .map_err(|e| CipherError::InvalidKeyLength(e.to_string()))
}

fn pad(plaintext: &[u8]) -> Vec<u8> {
    let fill = BLOCK_LEN - plaintext.len() % BLOCK_LEN;
    let mut data = Vec::with_capacity(plaintext.len() + fill);
    data.extend_from_slice(plaintext);
    data.resize(plaintext.len() + fill, fill as u8);
    data
}

fn unpad(mut data: Vec<u8>) -> Result<Vec<u8>, CipherError> {
    let fill = usize::from(*data.last().ok_or(CipherError::InvalidPadding)?);
    if fill == 0 || fill > BLOCK_LEN || fill > data.len() {
        return Err(CipherError::InvalidPadding);
    }

    let start = data.len() - fill;
    if !data[start..].iter().all(|&b| usize::from(b) == fill) {
        return Err(CipherError::InvalidPadding);
    }

    data.truncate(start);
    Ok(data)
}
