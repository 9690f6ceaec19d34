//! Turns programming identifiers and doc-comment prose into plain,
//! space-separated words a spellchecker can read.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // camelCase / PascalCase boundary
    static ref LOWER_UPPER: Regex = Regex::new(r"(\p{Ll})(\p{Lu})").unwrap();
    // acronym followed by a capitalized word: SAPFiles -> SAP Files
    static ref ACRONYM: Regex = Regex::new(r"(\p{Lu}+)(\p{Lu}\p{Ll})").unwrap();
}

/// Characters that never belong to a word: identifier separators, comment
/// delimiters, sigils, and the punctuation of embedded type annotations
/// such as `array<value-of<Suit>, int>`.
fn is_separator(ch: char) -> bool {
    matches!(
        ch,
        '_' | '-'
            | '<'
            | '>'
            | ','
            | '*'
            | '/'
            | '@'
            | '$'
            | '|'
            | '&'
            | '?'
            | '\\'
            | ':'
            | ';'
            | '='
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '#'
            | '"'
            | '`'
    ) || ch.is_whitespace()
}

/// Identifier normalizer.
///
/// Lowercasing is the last stage and the only optional one; display code
/// that wants to keep the original casing uses [`Normalizer::preserving_case`].
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    lowercase: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self { lowercase: true }
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preserving_case() -> Self {
        Self { lowercase: false }
    }

    pub fn apply(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let spaced: String = raw
            .chars()
            .map(|ch| if is_separator(ch) { ' ' } else { ch })
            .collect();

        let split = LOWER_UPPER.replace_all(&spaced, "$1 $2");
        let split = ACRONYM.replace_all(&split, "$1 $2");

        let words = split.split_whitespace().collect::<Vec<_>>().join(" ");

        if self.lowercase {
            words.to_lowercase()
        } else {
            words
        }
    }
}

/// Normalizes with the default (lowercasing) policy.
pub fn normalize(raw: &str) -> String {
    Normalizer::default().apply(raw)
}
