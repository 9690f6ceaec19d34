//! Memoizes spellchecker answers by the exact normalized text they were
//! asked about.

pub mod store;

pub use store::{CacheStore, FileStore, MemoryStore};

use crate::error::{CacheError, SpellcheckError};
use crate::speller::Spellchecker;
use crate::Misspelling;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Cache key for a piece of text: lowercase SHA-256 hex.
pub fn cache_key(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Directory holding entries for one backend and language.
pub fn namespace_dir(root: &Path, backend: &str, language: &str) -> PathBuf {
    root.join(format!("{backend}-{language}"))
}

/// Spellchecks `text`, answering from `store` when possible.
///
/// A stored empty list is a hit. An entry that no longer deserializes is
/// treated as a miss and overwritten. Failing to write the fresh result is
/// logged and otherwise ignored.
pub fn check_with_cache<S, C>(
    spellchecker: &S,
    store: &C,
    text: &str,
    ttl: Option<Duration>,
) -> Result<Vec<Misspelling>, SpellcheckError>
where
    S: Spellchecker + ?Sized,
    C: CacheStore + ?Sized,
{
    let key = cache_key(text);

    if let Some(bytes) = store.get(&key) {
        match serde_json::from_slice::<Vec<Misspelling>>(&bytes) {
            Ok(misspellings) => {
                tracing::debug!(%key, "cache hit");
                return Ok(misspellings);
            }
            Err(e) => tracing::debug!(%key, error = %e, "discarding corrupt cache entry"),
        }
    }

    let misspellings = spellchecker.check(text)?;

    match serde_json::to_vec(&misspellings) {
        Ok(bytes) => {
            if let Err(e) = store.set(&key, &bytes, ttl) {
                tracing::warn!(error = %e, "failed to write cache entry");
            }
        }
        Err(e) => tracing::warn!(error = %e, "failed to encode cache entry"),
    }

    Ok(misspellings)
}

/// A spellchecker that consults a [`CacheStore`] before delegating.
pub struct CachedSpellchecker<S, C> {
    inner: S,
    store: C,
    ttl: Option<Duration>,
}

impl<S: Spellchecker, C: CacheStore> CachedSpellchecker<S, C> {
    pub fn new(inner: S, store: C) -> Self {
        Self {
            inner,
            store,
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn store(&self) -> &C {
        &self.store
    }
}

impl<S: Spellchecker, C: CacheStore> Spellchecker for CachedSpellchecker<S, C> {
    fn check(&self, text: &str) -> Result<Vec<Misspelling>, SpellcheckError> {
        check_with_cache(&self.inner, &self.store, text, self.ttl)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Removes cached entries under `root`.
///
/// With a namespace only that backend/language directory is cleared,
/// otherwise every namespace directory is. Returns the number of entries
/// removed; a missing root removes nothing. A namespace must be a single
/// directory name inside `root`.
pub fn clear(root: &Path, namespace: Option<&str>) -> Result<usize, CacheError> {
    if let Some(namespace) = namespace {
        let mut components = Path::new(namespace).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(CacheError::InvalidNamespace(namespace.to_string()));
        }
    }

    if !root.exists() {
        return Ok(0);
    }

    let dirs: Vec<PathBuf> = match namespace {
        Some(namespace) => vec![root.join(namespace)],
        None => fs::read_dir(root)
            .map_err(|source| CacheError::Io {
                path: root.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect(),
    };

    let mut removed = 0;
    for dir in dirs.into_iter().filter(|dir| dir.is_dir()) {
        removed += FileStore::open(&dir)?.clear("")?;
        tracing::debug!(dir = %dir.display(), "cleared cache namespace");
    }

    Ok(removed)
}
