use crate::error::SpellcheckError;
use crate::speller::{suggestions, Spellchecker};
use crate::{Misspelling, MAX_SUGGESTIONS};
use anyhow::{Context, Result};
use fst::{Automaton, IntoStreamer, Set, SetBuilder, Streamer};
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

/// Bytes behind an FST set: built in memory or mapped from an installed
/// `.dict` file.
enum Backing {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl AsRef<[u8]> for Backing {
    fn as_ref(&self) -> &[u8] {
        match self {
            Backing::Owned(bytes) => bytes,
            Backing::Mapped(mmap) => mmap,
        }
    }
}

pub struct Dictionary {
    set: Set<Backing>,
}

impl Dictionary {
    /// Load the installed dictionary for the given language.
    pub fn load(language: &str) -> Result<Self, SpellcheckError> {
        let dict_path = Self::dictionary_path(language).ok_or_else(|| {
            SpellcheckError::Unavailable {
                program: "dictionary".to_string(),
                reason: "could not determine the data directory".to_string(),
            }
        })?;

        if !dict_path.exists() {
            return Err(SpellcheckError::Unavailable {
                program: "dictionary".to_string(),
                reason: format!(
                    "no dictionary installed for {language}; run `identspell dict download {language}`"
                ),
            });
        }

        Self::load_from_path(&dict_path)
    }

    /// Load a compiled `.dict` file, or build one in memory from a plain
    /// word list (one word per line, `#` comments allowed).
    pub fn load_from_path(path: &Path) -> Result<Self, SpellcheckError> {
        let failure = |message: String| SpellcheckError::Dictionary {
            path: path.to_path_buf(),
            message,
        };

        if path.extension().and_then(|e| e.to_str()) == Some("dict") {
            let file = File::open(path).map_err(|e| failure(e.to_string()))?;
            // SAFETY: installed dictionaries are written once by `dict download`
            // and never modified in place while mapped.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| failure(e.to_string()))?;
            let set = Set::new(Backing::Mapped(mmap)).map_err(|e| failure(e.to_string()))?;
            return Ok(Self { set });
        }

        let content = fs::read_to_string(path).map_err(|e| failure(e.to_string()))?;
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        Self::from_words(words).map_err(|e| failure(e.to_string()))
    }

    /// Build an in-memory dictionary. Words are lowercased.
    pub fn from_words<I, S>(words: I) -> Result<Self, fst::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        sorted.sort();
        sorted.dedup();

        let set = Set::from_iter(sorted)?;
        let bytes = set.into_fst().into_inner();

        Ok(Self {
            set: Set::new(Backing::Owned(bytes))?,
        })
    }

    /// Check if word exists in dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Get all words with a given prefix
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        let mut stream = self
            .set
            .search(fst::automaton::Str::new(prefix).starts_with())
            .into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                results.push(word);
            }
        }

        results
    }

    /// Words whose length is within `slack` characters of `len`.
    ///
    /// Walks the whole set; only used for very short words.
    pub fn words_near_length(&self, len: usize, slack: usize) -> Vec<String> {
        let mut words = Vec::new();
        let mut stream = self.set.stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = std::str::from_utf8(key) {
                if word.chars().count().abs_diff(len) <= slack {
                    words.push(word.to_string());
                }
            }
        }

        words
    }

    /// Compile a word list into an FST file.
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<()> {
        let mut sorted_words: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        sorted_words.sort();
        sorted_words.dedup();

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer).context("Failed to create FST builder")?;

        for word in sorted_words {
            builder
                .insert(word.as_bytes())
                .context("Failed to insert word into dictionary")?;
        }

        builder.finish().context("Failed to finalize dictionary")?;

        Ok(())
    }

    pub fn dictionary_path(language: &str) -> Option<PathBuf> {
        crate::config::Config::data_dir().map(|dir| dir.join(format!("{}.dict", language)))
    }
}

/// Spellchecker backed by an FST word set, with edit-distance suggestions.
pub struct DictionarySpellchecker {
    dictionary: Dictionary,
    max_suggestions: usize,
}

impl DictionarySpellchecker {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }

    fn should_skip(word: &str) -> bool {
        // Single letters and anything with digits or punctuation
        word.chars().count() <= 1 || !word.chars().all(char::is_alphabetic)
    }
}

impl Spellchecker for DictionarySpellchecker {
    fn check(&self, text: &str) -> Result<Vec<Misspelling>, SpellcheckError> {
        let mut misspellings = Vec::new();

        for word in text.unicode_words() {
            if Self::should_skip(word) {
                continue;
            }

            let word = word.to_lowercase();
            if self.dictionary.contains(&word) {
                continue;
            }

            let suggestions = suggestions::generate(&word, &self.dictionary, self.max_suggestions);
            misspellings.push(Misspelling::new(word, suggestions));
        }

        Ok(misspellings)
    }

    fn name(&self) -> &str {
        "dictionary"
    }
}
