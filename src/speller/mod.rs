pub mod aspell;
pub mod dictionary;
pub mod suggestions;

pub use aspell::Aspell;
pub use dictionary::{Dictionary, DictionarySpellchecker};

use crate::error::SpellcheckError;
use crate::Misspelling;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A spelling backend. Given lowercase normalized text of any length,
/// returns every out-of-dictionary word with ranked corrections.
pub trait Spellchecker: Send + Sync {
    fn check(&self, text: &str) -> Result<Vec<Misspelling>, SpellcheckError>;

    /// Short backend name, used to namespace cached results.
    fn name(&self) -> &str;
}

impl<T: Spellchecker + ?Sized> Spellchecker for Box<T> {
    fn check(&self, text: &str) -> Result<Vec<Misspelling>, SpellcheckError> {
        (**self).check(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Spellchecker + ?Sized> Spellchecker for Arc<T> {
    fn check(&self, text: &str) -> Result<Vec<Misspelling>, SpellcheckError> {
        (**self).check(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpellerKind {
    #[default]
    Aspell,
    Dictionary,
}

impl FromStr for SpellerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aspell" => Ok(SpellerKind::Aspell),
            "dictionary" | "dict" => Ok(SpellerKind::Dictionary),
            _ => Err(format!("Unknown spellchecker: {}", s)),
        }
    }
}

impl fmt::Display for SpellerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpellerKind::Aspell => write!(f, "aspell"),
            SpellerKind::Dictionary => write!(f, "dictionary"),
        }
    }
}
