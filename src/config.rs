use crate::error::ConfigError;
use crate::presets;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-project ignore-policy file.
pub const CONFIG_FILE: &str = "identspell.json";

pub const DEFAULT_LANGUAGE: &str = "en_US";

/// On-disk layout of `identspell.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default)]
    pub ignore: IgnoreSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreSection {
    #[serde(default)]
    pub words: Vec<String>,

    #[serde(default)]
    pub paths: Vec<String>,

    /// Older name for `paths`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directories: Vec<String>,

    /// Relative file path to words ignored in that file only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, Vec<String>>,
}

/// The normalized ignore policy of one scan. Read-only once built.
#[derive(Debug, Clone)]
pub struct Config {
    pub language: String,
    /// Lowercase words, presets included.
    pub whitelisted_words: HashSet<String>,
    /// Normalized relative path prefixes.
    pub whitelisted_paths: Vec<String>,
    /// Lowercase words per normalized relative file path.
    pub file_words: HashMap<String, HashSet<String>>,
    /// The file this policy was read from, if any.
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_parts(ConfigFile::default(), None)
    }
}

impl Config {
    /// Load the ignore policy for a scan of `root`.
    ///
    /// An explicit path must exist. Without one, `identspell.json` is looked
    /// up in `root` and then in the current directory; no file at all means
    /// an empty policy. A file that cannot be parsed is reported and
    /// replaced by an empty policy.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(root),
        };

        let Some(path) = path else {
            tracing::debug!("no configuration file found, using defaults");
            return Ok(Self::default());
        };

        match Self::from_file(&path) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded configuration");
                Ok(config)
            }
            Err(e @ ConfigError::Parse { .. }) => {
                tracing::warn!("{e}; continuing with an empty ignore policy");
                Ok(Self::from_parts(ConfigFile::default(), Some(path)))
            }
            Err(e) => Err(e),
        }
    }

    fn discover(root: &Path) -> Option<PathBuf> {
        [root.join(CONFIG_FILE), PathBuf::from(CONFIG_FILE)]
            .into_iter()
            .find(|candidate| candidate.is_file())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = Self::read_file(path)?;
        Ok(Self::from_parts(file, Some(path.to_path_buf())))
    }

    fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_parts(file: ConfigFile, source: Option<PathBuf>) -> Self {
        let ConfigFile {
            preset,
            presets,
            language,
            ignore,
        } = file;

        let selected: Vec<String> = preset.into_iter().chain(presets).collect();

        let whitelisted_words = ignore
            .words
            .iter()
            .map(String::as_str)
            .chain(presets::whitelisted_words(&selected))
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let whitelisted_paths = ignore
            .paths
            .iter()
            .chain(&ignore.directories)
            .map(|p| normalize_path(p))
            .filter(|p| !p.is_empty())
            .collect();

        let file_words = ignore
            .files
            .into_iter()
            .map(|(path, words)| {
                let words = words.iter().map(|w| w.trim().to_lowercase()).collect();
                (normalize_path(&path), words)
            })
            .collect();

        Self {
            language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            whitelisted_words,
            whitelisted_paths,
            file_words,
            source,
        }
    }

    /// Whether `word` is ignored globally, or in `file` (a path relative to
    /// the scan root). Case-insensitive.
    pub fn is_word_ignored(&self, word: &str, file: Option<&Path>) -> bool {
        let word = word.to_lowercase();

        if self.whitelisted_words.contains(&word) {
            return true;
        }

        file.and_then(|file| {
            self.file_words
                .get(&normalize_path(&file.to_string_lossy()))
        })
        .is_some_and(|words| words.contains(&word))
    }

    pub fn whitelisted_path_prefixes(&self) -> &[String] {
        &self.whitelisted_paths
    }

    /// Whether a path relative to the scan root falls under an ignored
    /// prefix. Prefixes match whole components: `src/Leg` does not cover
    /// `src/Legacy`.
    pub fn is_path_ignored(&self, relative: &Path) -> bool {
        let relative = normalize_path(&relative.to_string_lossy());

        self.whitelisted_paths.iter().any(|prefix| {
            relative == *prefix
                || relative
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Write a default configuration file. Refuses to overwrite one.
    pub fn init(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        let file = ConfigFile {
            preset: Some("base".to_string()),
            ..Default::default()
        };

        let contents = serde_json::to_string_pretty(&file).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        write_config(path, &contents)
    }

    /// Append words to `ignore.words`, lowercased and without duplicates.
    /// Keys this crate does not know about are preserved. Creates the file
    /// when missing. Returns the words actually added.
    pub fn add_ignored_words<S: AsRef<str>>(
        path: &Path,
        words: &[S],
    ) -> Result<Vec<String>, ConfigError> {
        let mut document: serde_json::Value = if path.exists() {
            let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_json::json!({})
        };

        if !document.is_object() {
            document = serde_json::json!({});
        }

        let root = document
            .as_object_mut()
            .ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?;
        let ignore = root
            .entry("ignore")
            .or_insert_with(|| serde_json::json!({}));
        if !ignore.is_object() {
            *ignore = serde_json::json!({});
        }

        let list = ignore
            .as_object_mut()
            .ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?
            .entry("words")
            .or_insert_with(|| serde_json::json!([]));
        if !list.is_array() {
            *list = serde_json::json!([]);
        }

        let mut added = Vec::new();
        if let Some(list) = list.as_array_mut() {
            let mut existing: HashSet<String> = list
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_lowercase)
                .collect();

            for word in words {
                let word = word.as_ref().trim().to_lowercase();
                if word.is_empty() || !existing.insert(word.clone()) {
                    continue;
                }
                list.push(serde_json::Value::String(word.clone()));
                added.push(word);
            }
        }

        let contents = serde_json::to_string_pretty(&document).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        write_config(path, &contents)?;
        Ok(added)
    }

    pub fn cache_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "identspell").map(|dirs| dirs.cache_dir().to_path_buf())
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "identspell").map(|dirs| dirs.data_dir().to_path_buf())
    }
}

fn write_config(path: &Path, contents: &str) -> Result<(), ConfigError> {
    fs::write(path, format!("{contents}\n")).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// `./src\Legacy/` -> `src/Legacy`
pub fn normalize_path(path: &str) -> String {
    let mut path = path.trim().replace('\\', "/");

    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_string();
    }

    path.trim_end_matches('/').to_string()
}
