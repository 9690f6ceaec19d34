pub mod declaration;
pub mod path;

pub use declaration::DeclarationChecker;
pub use path::PathChecker;

use crate::error::{LocalizationFailure, SpellcheckError};
use crate::localizer::ColumnTracker;
use crate::normalizer::normalize;
use crate::speller::Spellchecker;
use crate::{Config, Issue, Misspelling};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// A discovered file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Absolute path.
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    pub fn new(root: &Path, path: PathBuf, kind: EntryKind) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
        Self {
            path,
            relative,
            kind,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Issues found in one entry, plus the words that could not be located.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub issues: Vec<Issue>,
    pub failures: Vec<LocalizationFailure>,
}

impl CheckOutcome {
    pub fn merge(&mut self, other: CheckOutcome) {
        self.issues.extend(other.issues);
        self.failures.extend(other.failures);
    }

    /// Locate `misspelling` and record the result as an issue or a failure.
    fn record(&mut self, file: &Path, line: usize, misspelling: Misspelling, located: Result<usize, LocalizationFailure>) {
        match located {
            Ok(column) => self.issues.push(Issue {
                misspelling,
                file: file.to_path_buf(),
                line,
                column,
            }),
            Err(failure) => self.failures.push(failure),
        }
    }
}

/// A source of checkable text for one kind of entry.
pub trait Checker {
    fn name(&self) -> &'static str;

    /// Whether this checker applies to `entry` at all. Entries under an
    /// ignored path are never supported.
    fn supports(&self, entry: &Entry) -> bool;

    fn check(&self, entry: &Entry, columns: &ColumnTracker) -> Result<CheckOutcome, SpellcheckError>;
}

/// The fixed set of checkers a scan runs.
pub enum CheckerKind {
    Path(PathChecker),
    Declaration(DeclarationChecker),
}

impl CheckerKind {
    pub fn all(config: Arc<Config>, spellchecker: Arc<dyn Spellchecker>) -> Vec<CheckerKind> {
        vec![
            CheckerKind::Path(PathChecker::new(config.clone(), spellchecker.clone())),
            CheckerKind::Declaration(DeclarationChecker::new(config, spellchecker)),
        ]
    }
}

impl Checker for CheckerKind {
    fn name(&self) -> &'static str {
        match self {
            CheckerKind::Path(checker) => checker.name(),
            CheckerKind::Declaration(checker) => checker.name(),
        }
    }

    fn supports(&self, entry: &Entry) -> bool {
        match self {
            CheckerKind::Path(checker) => checker.supports(entry),
            CheckerKind::Declaration(checker) => checker.supports(entry),
        }
    }

    fn check(&self, entry: &Entry, columns: &ColumnTracker) -> Result<CheckOutcome, SpellcheckError> {
        match self {
            CheckerKind::Path(checker) => checker.check(entry, columns),
            CheckerKind::Declaration(checker) => checker.check(entry, columns),
        }
    }
}

/// Normalize `raw`, spellcheck it and drop the words the policy ignores for
/// `relative`.
fn find_misspellings(
    spellchecker: &dyn Spellchecker,
    config: &Config,
    raw: &str,
    relative: &Path,
) -> Result<Vec<Misspelling>, SpellcheckError> {
    let text = normalize(raw);
    if text.is_empty() {
        return Ok(Vec::new());
    }

    Ok(spellchecker
        .check(&text)?
        .into_iter()
        .filter(|m| !config.is_word_ignored(&m.word, Some(relative)))
        .collect())
}
