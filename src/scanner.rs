use crate::checker::{CheckOutcome, Checker, CheckerKind, Entry, EntryKind};
use crate::error::{LocalizationFailure, ScanError, SpellcheckError};
use crate::localizer::ColumnTracker;
use crate::speller::Spellchecker;
use crate::{Config, Issue};
use ignore::WalkBuilder;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Result of scanning one tree.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    /// Sorted by file path; issues of one file keep discovery order.
    pub issues: Vec<Issue>,
    /// Reported words that could not be found again in their source.
    pub failures: Vec<LocalizationFailure>,
    pub entries_scanned: usize,
}

impl ScanReport {
    pub fn is_pass(&self) -> bool {
        self.issues.is_empty()
    }
}

pub struct Scanner {
    config: Arc<Config>,
    checkers: Vec<CheckerKind>,
}

impl Scanner {
    pub fn new(config: Arc<Config>, spellchecker: Arc<dyn Spellchecker>) -> Self {
        let checkers = CheckerKind::all(config.clone(), spellchecker);
        Self { config, checkers }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn scan(&self, root: &Path) -> Result<ScanReport, ScanError> {
        self.scan_with_progress(root, |_| {}, || {})
    }

    /// Scan `root`. `on_discovered` receives the number of entries once
    /// discovery is done; `on_entry` runs after each entry is checked, from
    /// worker threads.
    pub fn scan_with_progress<D, F>(
        &self,
        root: &Path,
        on_discovered: D,
        on_entry: F,
    ) -> Result<ScanReport, ScanError>
    where
        D: FnOnce(usize),
        F: Fn() + Sync,
    {
        let root = root
            .canonicalize()
            .ok()
            .filter(|path| path.is_dir())
            .ok_or_else(|| ScanError::InvalidRoot(root.to_path_buf()))?;

        let entries = self.discover(&root);
        tracing::debug!(root = %root.display(), entries = entries.len(), "discovered entries");
        on_discovered(entries.len());

        let columns = ColumnTracker::new();

        let outcomes = entries
            .par_iter()
            .map(|entry| {
                let outcome = self.check_entry(entry, &columns);
                on_entry();
                outcome
            })
            .collect::<Result<Vec<_>, SpellcheckError>>()?;

        let mut report = ScanReport {
            entries_scanned: entries.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            report.issues.extend(outcome.issues);
            report.failures.extend(outcome.failures);
        }

        report.issues.sort_by(|a, b| a.file.cmp(&b.file));

        for failure in &report.failures {
            tracing::error!(
                file = %failure.file.display(),
                line = failure.line,
                word = %failure.word,
                "could not locate misspelling"
            );
        }

        Ok(report)
    }

    fn check_entry(&self, entry: &Entry, columns: &ColumnTracker) -> Result<CheckOutcome, SpellcheckError> {
        let mut outcome = CheckOutcome::default();

        for checker in &self.checkers {
            if checker.supports(entry) {
                tracing::debug!(checker = checker.name(), path = %entry.relative.display(), "checking");
                outcome.merge(checker.check(entry, columns)?);
            }
        }

        Ok(outcome)
    }

    /// Every file and directory under `root` in sorted walk order, without
    /// dotfiles, VCS-ignored files and ignored path prefixes.
    fn discover(&self, root: &Path) -> Vec<Entry> {
        let config = self.config.clone();
        let filter_root: PathBuf = root.to_path_buf();

        let walker = WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let relative = entry.path().strip_prefix(&filter_root).unwrap_or(entry.path());
                relative.as_os_str().is_empty() || !config.is_path_ignored(relative)
            })
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue;
            }

            let kind = match entry.file_type() {
                Some(ft) if ft.is_dir() => EntryKind::Dir,
                Some(ft) if ft.is_file() => EntryKind::File,
                _ => continue,
            };

            entries.push(Entry::new(root, entry.into_path(), kind));
        }

        entries
    }
}
