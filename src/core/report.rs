//! Decrypt-then-search pipeline and result formatting.
//!
//! [`Reporter`] pulls paths from the walker in batches, decrypts and searches
//! each batch on a worker pool, and writes the finished blocks in walk order.
//! A file's block is rendered in full before it is written, so blocks never
//! interleave.

use std::fs;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use console::Style;
use rayon::prelude::*;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::cipher::Cipher;
use crate::core::constants::BATCH_FACTOR;
use crate::core::matcher::{MatchLine, Matcher};
use crate::error::{Error, Result, SearchError};

/// Output styles.
#[derive(Debug, Clone)]
pub struct Palette {
    pub path: Style,
    pub matched: Style,
    pub warning: Style,
}

impl Palette {
    /// Bold green paths, bold red matches.
    pub fn colored() -> Self {
        Self {
            path: Style::new().green().bright().bold(),
            matched: Style::new().red().bold(),
            warning: Style::new().yellow().for_stderr(),
        }
    }

    /// No styling at all.
    pub fn plain() -> Self {
        Self {
            path: Style::new(),
            matched: Style::new(),
            warning: Style::new(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}

/// Stops dispatch of further files once cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Matches found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatches {
    pub path: PathBuf,
    pub lines: Vec<MatchLine>,
}

/// Result of processing one vault file.
#[derive(Debug)]
pub enum Outcome {
    NoMatch,
    Matched(FileMatches),
    Failed { path: PathBuf, error: Error },
    Cancelled,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub scanned: usize,
    pub matched: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// Runs the search over a sequence of vault files.
pub struct Reporter<'a, C: Cipher> {
    cipher: &'a C,
    secret: &'a C::Secret,
    matcher: &'a Matcher,
    palette: Palette,
    jobs: usize,
    cancel: CancelToken,
}

impl<'a, C: Cipher> Reporter<'a, C> {
    /// Create a reporter using one worker per available CPU.
    pub fn new(cipher: &'a C, secret: &'a C::Secret, matcher: &'a Matcher) -> Self {
        Self {
            cipher,
            secret,
            matcher,
            palette: Palette::default(),
            jobs: default_jobs(),
            cancel: CancelToken::new(),
        }
    }

    /// Number of files processed concurrently.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Read, decrypt and search a single file.
    pub fn process(&self, path: &Path) -> Outcome {
        if self.cancel.is_cancelled() {
            return Outcome::Cancelled;
        }

        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) => {
                return Outcome::Failed {
                    path: path.to_path_buf(),
                    error: e.into(),
                }
            }
        };

        let plaintext = match self.cipher.decrypt(&raw, self.secret) {
            Ok(plaintext) => Zeroizing::new(plaintext),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "decrypt failed");
                return Outcome::Failed {
                    path: path.to_path_buf(),
                    error: e.into(),
                };
            }
        };

        let text = String::from_utf8_lossy(&plaintext);
        if !self.matcher.search_bulk(&text) {
            trace!(path = %path.display(), "no match");
            return Outcome::NoMatch;
        }

        // Matches spanning a newline have no line of their own to show.
        let lines = self.matcher.matching_lines(&text);
        if lines.is_empty() {
            trace!(path = %path.display(), "match spans lines only");
            return Outcome::NoMatch;
        }

        Outcome::Matched(FileMatches {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Process every file, writing match blocks to `out` and per-file
    /// diagnostics to `diag`.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot start or a sink cannot be
    /// written. Failures of individual files are reported to `diag` instead.
    pub fn run<I, W, E>(&self, files: I, out: &mut W, diag: &mut E) -> Result<Summary>
    where
        I: IntoIterator<Item = PathBuf>,
        W: Write,
        E: Write,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .thread_name(|i| format!("vaultgrep-worker-{}", i))
            .build()
            .map_err(|e| SearchError::ThreadPool(e.to_string()))?;

        debug!(jobs = self.jobs, cipher = self.cipher.name(), "starting search");

        let mut files = files.into_iter();
        let batch_len = self.jobs * BATCH_FACTOR;
        let mut summary = Summary::default();

        loop {
            if self.cancel.is_cancelled() {
                summary.cancelled = true;
                break;
            }

            let batch: Vec<PathBuf> = files.by_ref().take(batch_len).collect();
            if batch.is_empty() {
                break;
            }

            let outcomes: Vec<Outcome> =
                pool.install(|| batch.par_iter().map(|path| self.process(path)).collect());

            for outcome in outcomes {
                self.write_outcome(outcome, &mut summary, out, diag)?;
            }
        }

        if summary.matched == 0 && !summary.cancelled {
            writeln!(out, "No matches found for pattern: {}", self.matcher.pattern())?;
        }
        out.flush()?;
        diag.flush()?;

        debug!(
            scanned = summary.scanned,
            matched = summary.matched,
            failed = summary.failed,
            cancelled = summary.cancelled,
            "search finished"
        );
        Ok(summary)
    }

    /// Format a file's block: styled path, indented lines, blank separator.
    pub fn render(&self, matches: &FileMatches) -> String {
        let mut block = format!("{}\n", self.palette.path.apply_to(matches.path.display()));
        for line in &matches.lines {
            block.push_str("  ");
            block.push_str(&line.rendered);
            block.push('\n');
        }
        block.push('\n');
        block
    }

    fn write_outcome<W: Write, E: Write>(
        &self,
        outcome: Outcome,
        summary: &mut Summary,
        out: &mut W,
        diag: &mut E,
    ) -> Result<()> {
        match outcome {
            Outcome::NoMatch => summary.scanned += 1,
            Outcome::Matched(matches) => {
                summary.scanned += 1;
                summary.matched += 1;
                out.write_all(self.render(&matches).as_bytes())?;
            }
            Outcome::Failed { path, error } => {
                summary.scanned += 1;
                summary.failed += 1;
                let message = match error {
                    Error::Io(e) => format!("cannot read {}: {}", path.display(), e),
                    other => format!("cannot decrypt {}: {}", path.display(), other),
                };
                writeln!(diag, "{}", self.palette.warning.apply_to(format!("⚠ {}", message)))?;
            }
            Outcome::Cancelled => summary.cancelled = true,
        }
        Ok(())
    }
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
