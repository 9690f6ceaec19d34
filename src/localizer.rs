//! Maps a reported word back to the column it occupies in its source line.
//!
//! The same misspelled word can occur several times on one line (two
//! parameters sharing a typo, a constant name and its value). Every lookup
//! for a given `(file, line, word)` resumes right after the previous match,
//! so successive issues land on successive occurrences.

use crate::error::LocalizationFailure;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};

type ColumnKey = (PathBuf, usize, String);

/// Last column found per `(file, line, word)`.
///
/// Owned by one scan. Each lookup holds the map entry for its key while it
/// searches and records, so workers never race on the same key.
#[derive(Debug, Default)]
pub struct ColumnTracker {
    last: DashMap<ColumnKey, usize>,
    /// Case-insensitive matcher per reported word.
    matchers: DashMap<String, Regex>,
}

impl ColumnTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the next unclaimed occurrence of `word` in `text`.
    ///
    /// The search ignores Unicode case: the reported word is lowercase while
    /// identifiers are mixed-case (`Ärgerr` is found for `ärgerr`). Returns
    /// the 0-based byte column.
    pub fn locate(
        &self,
        file: &Path,
        line: usize,
        text: &str,
        word: &str,
    ) -> Result<usize, LocalizationFailure> {
        let failure = || LocalizationFailure {
            file: file.to_path_buf(),
            line,
            word: word.to_string(),
        };

        if word.is_empty() {
            return Err(failure());
        }

        let matcher = self.matcher(word).ok_or_else(failure)?;

        match self
            .last
            .entry((file.to_path_buf(), line, word.to_string()))
        {
            Entry::Occupied(mut entry) => {
                let column = find_from(&matcher, text, *entry.get() + 1).ok_or_else(failure)?;
                entry.insert(column);
                Ok(column)
            }
            Entry::Vacant(entry) => {
                let column = find_from(&matcher, text, 0).ok_or_else(failure)?;
                entry.insert(column);
                Ok(column)
            }
        }
    }

    /// Same as [`ColumnTracker::locate`], picking the 1-based `line` out of
    /// the file's lines.
    pub fn locate_in_lines(
        &self,
        file: &Path,
        lines: &[&str],
        line: usize,
        word: &str,
    ) -> Result<usize, LocalizationFailure> {
        let text = line
            .checked_sub(1)
            .and_then(|index| lines.get(index))
            .copied()
            .ok_or_else(|| LocalizationFailure {
                file: file.to_path_buf(),
                line,
                word: word.to_string(),
            })?;

        self.locate(file, line, text, word)
    }

    fn matcher(&self, word: &str) -> Option<Regex> {
        if let Some(matcher) = self.matchers.get(word) {
            return Some(matcher.clone());
        }

        let matcher = RegexBuilder::new(&regex::escape(word))
            .case_insensitive(true)
            .build()
            .ok()?;
        self.matchers.insert(word.to_string(), matcher.clone());
        Some(matcher)
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}

fn find_from(matcher: &Regex, text: &str, start: usize) -> Option<usize> {
    let mut start = start;
    while start < text.len() && !text.is_char_boundary(start) {
        start += 1;
    }

    if start > text.len() {
        return None;
    }

    matcher.find_at(text, start).map(|found| found.start())
}
