use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or updating the ignore-policy file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write configuration file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuration file {} already exists", .0.display())]
    AlreadyExists(PathBuf),
}

/// Errors raised by a spellchecker backend. Any of them aborts the scan:
/// no issue can be trusted without a working spellchecker.
#[derive(Debug, Error)]
pub enum SpellcheckError {
    #[error("spellchecker `{program}` is unavailable: {reason}")]
    Unavailable { program: String, reason: String },

    #[error("spellchecker `{program}` failed: {message}")]
    Failed { program: String, message: String },

    #[error("failed to load dictionary {}: {message}", path.display())]
    Dictionary { path: PathBuf, message: String },
}

/// A reported word that could not be found again in the text it was
/// extracted from. This is a defect in the extraction, not a user-facing
/// issue.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("could not find '{word}' on line {line} of {}", file.display())]
pub struct LocalizationFailure {
    pub file: PathBuf,
    pub line: usize,
    pub word: String,
}

/// Errors raised by the on-disk cache store. The spellcheck cache logs
/// these and carries on.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid cache namespace `{0}`: expected a single directory name such as `aspell-en_US`")]
    InvalidNamespace(String),

    #[error("failed to persist cache entry {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Errors that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root {} is not a directory", .0.display())]
    InvalidRoot(PathBuf),

    #[error(transparent)]
    Spellcheck(#[from] SpellcheckError),
}
