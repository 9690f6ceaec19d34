pub mod cache;
pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod localizer;
pub mod normalizer;
pub mod parser;
pub mod presets;
pub mod scanner;
pub mod speller;

pub use config::Config;
pub use error::{ConfigError, LocalizationFailure, ScanError, SpellcheckError};
pub use normalizer::normalize;
pub use scanner::{ScanReport, Scanner};
pub use speller::Spellchecker;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum number of suggestions kept per misspelling.
pub const MAX_SUGGESTIONS: usize = 4;

/// A single out-of-dictionary word and its ranked corrections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Misspelling {
    pub word: String,
    pub suggestions: Vec<String>,
}

impl Misspelling {
    /// Suggestions that could not be substituted into an identifier (anything
    /// with a non-alphabetic character) are dropped, duplicates are removed
    /// keeping the first occurrence, and at most [`MAX_SUGGESTIONS`] remain.
    pub fn new(word: impl Into<String>, suggestions: impl IntoIterator<Item = String>) -> Self {
        let mut kept: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);

        for suggestion in suggestions {
            if kept.len() == MAX_SUGGESTIONS {
                break;
            }
            if suggestion.is_empty() || !suggestion.chars().all(char::is_alphabetic) {
                continue;
            }
            if !kept.contains(&suggestion) {
                kept.push(suggestion);
            }
        }

        Self {
            word: word.into(),
            suggestions: kept,
        }
    }
}

/// A located misspelling.
///
/// `line == 0` marks a path-level issue (a misspelled file or directory
/// name); its `column` then indexes into the entry's file name instead of a
/// source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub misspelling: Misspelling,
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Issue {
    pub fn is_path_level(&self) -> bool {
        self.line == 0
    }
}
