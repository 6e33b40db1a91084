//! Directory traversal yielding vault files.
//!
//! Traversal is an explicit depth-first iterator, so stack depth stays
//! bounded on deep trees and a consumer can stop at any point.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::{DirEntry, FilterEntry, WalkDir};

use crate::core::constants::DEFAULT_EXCLUDES;
use crate::core::detect::is_vault;

type EntryFilter = Box<dyn FnMut(&DirEntry) -> bool + Send>;

/// Traversal settings for one root directory.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    excludes: BTreeSet<OsString>,
}

impl Walker {
    /// Walk `root`, skipping the default excluded directory names.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excludes: DEFAULT_EXCLUDES.iter().map(OsString::from).collect(),
        }
    }

    /// Also skip directories with this exact name, at any depth.
    pub fn exclude(mut self, name: impl Into<OsString>) -> Self {
        self.excludes.insert(name.into());
        self
    }

    /// Start a fresh traversal.
    pub fn files(&self) -> VaultFiles {
        let excludes = self.excludes.clone();
        let filter: EntryFilter = Box::new(move |entry: &DirEntry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir() && excludes.contains(entry.file_name()))
        });

        VaultFiles {
            inner: WalkDir::new(&self.root)
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(filter),
        }
    }
}

/// Lazy sequence of vault file paths under a root.
///
/// Unreadable subtrees and entries are skipped.
pub struct VaultFiles {
    inner: FilterEntry<walkdir::IntoIter, EntryFilter>,
}

impl Iterator for VaultFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(path = ?e.path(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            // Symlinks are not followed, so they report as neither file nor dir.
            if !entry.file_type().is_file() {
                continue;
            }

            match entry.metadata() {
                Ok(meta) if meta.len() > 0 => {}
                Ok(_) => continue,
                Err(e) => {
                    debug!(path = %entry.path().display(), error = %e, "cannot stat file");
                    continue;
                }
            }

            if is_vault(entry.path()) {
                trace!(path = %entry.path().display(), "found vault file");
                return Some(entry.into_path());
            }
        }
    }
}

/// Vault files under `root`, with default exclusions.
pub fn find_files(root: &Path) -> VaultFiles {
    Walker::new(root).files()
}
