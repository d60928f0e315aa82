//! Compiled match-pattern values.
//!
//! A pattern carries its source text, its compile flags, and a mutable scan
//! offset (the position the next match attempt starts from). Cloning a
//! pattern means recompiling from source and flags and carrying the scan
//! offset forward, so the clone resumes matching exactly where the source
//! would have.

use std::cell::Cell;
use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern failed to compile: {0}")]
    Compile(#[from] regex::Error),
}

/// Compile flags for a pattern, mapped onto the regex builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternFlags {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
}

impl PatternFlags {
    /// Render as a compact flag string, e.g. `"im"`.
    #[must_use]
    pub fn as_short(self) -> String {
        let mut out = String::new();
        if self.case_insensitive {
            out.push('i');
        }
        if self.multi_line {
            out.push('m');
        }
        if self.dot_matches_new_line {
            out.push('s');
        }
        if self.ignore_whitespace {
            out.push('x');
        }
        out
    }
}

/// A compiled match-pattern plus its flags and current scan offset.
pub struct PatternValue {
    source: String,
    flags: PatternFlags,
    last_index: Cell<usize>,
    regex: Regex,
}

impl PatternValue {
    /// Compile `source` under `flags`, with the scan offset at zero.
    pub fn compile(source: impl Into<String>, flags: PatternFlags) -> Result<Self, PatternError> {
        let source = source.into();
        let regex = RegexBuilder::new(&source)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_matches_new_line)
            .ignore_whitespace(flags.ignore_whitespace)
            .build()?;
        Ok(Self {
            source,
            flags,
            last_index: Cell::new(0),
            regex,
        })
    }

    /// Recompile an independent pattern with identical source text and flags,
    /// carrying the current scan offset forward.
    pub fn rebuild(&self) -> Result<Self, PatternError> {
        let fresh = Self::compile(self.source.clone(), self.flags)?;
        fresh.last_index.set(self.last_index.get());
        Ok(fresh)
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.last_index.get()
    }

    pub fn set_last_index(&self, index: usize) {
        self.last_index.set(index);
    }

    /// Find the next match in `haystack` starting at the scan offset,
    /// advancing the offset past the match (or resetting it on a miss).
    pub fn scan<'h>(&self, haystack: &'h str) -> Option<&'h str> {
        let start = self.last_index.get();
        if start > haystack.len() {
            self.last_index.set(0);
            return None;
        }
        match self.regex.find_at(haystack, start) {
            Some(found) => {
                self.last_index.set(found.end());
                Some(found.as_str())
            }
            None => {
                self.last_index.set(0);
                None
            }
        }
    }

    /// Whether `haystack` matches anywhere, ignoring the scan offset.
    #[must_use]
    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl fmt::Debug for PatternValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pattern(/{}/{} @{})",
            self.source,
            self.flags.as_short(),
            self.last_index.get()
        )
    }
}
