//! Vault file detection.
//!
//! A file is a vault file when its first line carries the `$ANSIBLE_VAULT`
//! marker. Only that line is read.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::core::constants::{MAX_HEADER_LEN, VAULT_MARKER};

/// Check whether `path` is a vault file.
///
/// Reads at most [`MAX_HEADER_LEN`] bytes. Any I/O error (permission denied,
/// dangling symlink, a directory) yields `false`.
pub fn is_vault(path: &Path) -> bool {
    match first_line(path) {
        Ok(line) => contains_marker(&line),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot read file header");
            false
        }
    }
}

fn first_line(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file.take(MAX_HEADER_LEN));
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    Ok(line)
}

fn contains_marker(line: &[u8]) -> bool {
    let marker = VAULT_MARKER.as_bytes();
    line.windows(marker.len()).any(|w| w == marker)
}
