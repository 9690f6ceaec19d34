use crate::error::CacheError;
use dashmap::DashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Byte-oriented key/value storage for spellcheck results.
pub trait CacheStore: Send + Sync {
    /// Returns the stored bytes, or `None` when absent or expired.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Stores `value`, optionally expiring after `ttl`.
    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), CacheError>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes every entry whose key starts with `prefix` (all entries for an
    /// empty prefix). Returns how many were removed.
    fn clear(&self, prefix: &str) -> Result<usize, CacheError>;
}

const HEADER_PREFIX: &str = "expires:";
const NEVER: &str = "never";

/// One file per key in a single directory.
///
/// Each file starts with an `expires:<unix seconds|never>` line followed by
/// the raw value. Writes go to a temporary file in the same directory and
/// are renamed into place, so readers never observe a partial entry.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| CacheError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(sanitize_key(key))
    }
}

fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Splits an entry into its expiry and value. `None` for a malformed entry.
fn decode_entry(raw: &[u8]) -> Option<(Option<u64>, &[u8])> {
    let newline = raw.iter().position(|&b| b == b'\n')?;
    let header = std::str::from_utf8(&raw[..newline]).ok()?;
    let expiry = header.strip_prefix(HEADER_PREFIX)?;

    let expires_at = if expiry == NEVER {
        None
    } else {
        Some(expiry.parse::<u64>().ok()?)
    };

    Some((expires_at, &raw[newline + 1..]))
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(key);
        let raw = fs::read(&path).ok()?;

        let Some((expires_at, value)) = decode_entry(&raw) else {
            tracing::debug!(path = %path.display(), "malformed cache entry");
            return None;
        };

        // Expired entries stay on disk until the next `set` replaces them.
        if expires_at.is_some_and(|at| unix_now() >= at) {
            return None;
        }

        Some(value.to_vec())
    }

    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), CacheError> {
        let path = self.entry_path(key);
        let io_error = |source| CacheError::Io {
            path: path.clone(),
            source,
        };

        let expiry = match ttl {
            Some(ttl) => (unix_now() + ttl.as_secs()).to_string(),
            None => NEVER.to_string(),
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_error)?;
        writeln!(tmp, "{HEADER_PREFIX}{expiry}").map_err(io_error)?;
        tmp.write_all(value).map_err(io_error)?;
        tmp.flush().map_err(io_error)?;

        tmp.persist(&path).map_err(|source| CacheError::Persist {
            path: path.clone(),
            source,
        })?;

        Ok(())
    }

    fn clear(&self, prefix: &str) -> Result<usize, CacheError> {
        let prefix = sanitize_key(prefix);
        let mut removed = 0;

        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&prefix));

            if matches {
                fs::remove_file(entry.path()).map_err(|source| CacheError::Io {
                    path: entry.path().to_path_buf(),
                    source,
                })?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}

/// In-process store for tests and library callers that need no persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, (Vec<u8>, Option<SystemTime>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        {
            let entry = self.entries.get(key)?;
            let (value, expires_at) = entry.value();
            if expires_at.map_or(true, |at| SystemTime::now() < at) {
                return Some(value.clone());
            }
        }

        // Only drop the entry if it is still expired under the shard lock.
        self.entries.remove_if(key, |_, (_, expires_at)| {
            expires_at.is_some_and(|at| SystemTime::now() >= at)
        });
        None
    }

    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at = ttl.map(|ttl| SystemTime::now() + ttl);
        self.entries
            .insert(key.to_string(), (value.to_vec(), expires_at));
        Ok(())
    }

    fn clear(&self, prefix: &str) -> Result<usize, CacheError> {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - self.entries.len())
    }
}
