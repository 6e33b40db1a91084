//! Pattern matching and highlighting over decrypted text.

use std::collections::HashSet;

use console::Style;
use regex::{Regex, RegexBuilder};

use crate::error::{Result, SearchError};

/// How the user-supplied pattern is compiled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub ignore_case: bool,
    /// Match the pattern literally instead of as a regex.
    pub fixed_strings: bool,
}

/// One distinct matching line of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLine {
    pub line: String,
    pub rendered: String,
}

/// A search pattern compiled once per run.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    regex: Regex,
    highlight: Style,
}

impl Matcher {
    /// Compile `pattern`.
    ///
    /// `^` and `$` anchor at line boundaries, so the whole-text check agrees
    /// with the per-line scan. A `\r\n` terminator counts as a line boundary.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidPattern` if the pattern does not compile.
    pub fn new(pattern: &str, options: MatchOptions, highlight: Style) -> Result<Self> {
        let source = if options.fixed_strings {
            regex::escape(pattern)
        } else {
            pattern.to_string()
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(options.ignore_case)
            .multi_line(true)
            .crlf(true)
            .build()
            .map_err(SearchError::InvalidPattern)?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            highlight,
        })
    }

    /// The pattern as the user wrote it.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern matches anywhere in `text`.
    pub fn search_bulk(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Render a matching line: the first match is highlighted and leading
    /// whitespace is stripped.
    ///
    /// Later matches on the same line are left as-is. A line without a match
    /// comes back trimmed and unhighlighted.
    pub fn search_line(&self, line: &str) -> String {
        let offset = line.len() - line.trim_start().len();
        let Some(found) = self.regex.find(line) else {
            return line[offset..].to_string();
        };

        // A match reaching into the indentation is highlighted from the first
        // visible character.
        let start = found.start().max(offset);
        let end = found.end().max(start);
        if start == end {
            return line[offset..].to_string();
        }

        let emphasized = self.highlight.apply_to(&line[start..end]).to_string();
        let mut rendered = String::with_capacity(line.len() + emphasized.len());
        rendered.push_str(&line[offset..start]);
        rendered.push_str(&emphasized);
        rendered.push_str(&line[end..]);
        rendered
    }

    /// Distinct matching lines of `text`, in order of first occurrence.
    pub fn matching_lines(&self, text: &str) -> Vec<MatchLine> {
        let mut seen = HashSet::new();
        text.lines()
            .filter(|line| self.regex.is_match(line))
            .filter(|line| seen.insert(*line))
            .map(|line| MatchLine {
                line: line.to_string(),
                rendered: self.search_line(line),
            })
            .collect()
    }
}
