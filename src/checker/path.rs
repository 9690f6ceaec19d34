use super::{find_misspellings, CheckOutcome, Checker, Entry, EntryKind};
use crate::error::SpellcheckError;
use crate::localizer::ColumnTracker;
use crate::speller::Spellchecker;
use crate::Config;
use std::sync::Arc;

/// Spellchecks file and directory names.
///
/// Files are checked by stem (`ClassWithTypoos.php` checks
/// `ClassWithTypoos`). Issues are path-level: line 0, column inside the
/// entry's file name.
pub struct PathChecker {
    config: Arc<Config>,
    spellchecker: Arc<dyn Spellchecker>,
}

impl PathChecker {
    pub fn new(config: Arc<Config>, spellchecker: Arc<dyn Spellchecker>) -> Self {
        Self {
            config,
            spellchecker,
        }
    }
}

impl Checker for PathChecker {
    fn name(&self) -> &'static str {
        "path"
    }

    fn supports(&self, entry: &Entry) -> bool {
        !entry.relative.as_os_str().is_empty() && !self.config.is_path_ignored(&entry.relative)
    }

    fn check(&self, entry: &Entry, columns: &ColumnTracker) -> Result<CheckOutcome, SpellcheckError> {
        let mut outcome = CheckOutcome::default();

        let Some(file_name) = entry.path.file_name().map(|n| n.to_string_lossy()) else {
            return Ok(outcome);
        };

        let checked = match entry.kind {
            EntryKind::File => entry
                .path
                .file_stem()
                .map(|s| s.to_string_lossy())
                .unwrap_or_else(|| file_name.clone()),
            EntryKind::Dir => file_name.clone(),
        };

        for misspelling in find_misspellings(
            self.spellchecker.as_ref(),
            &self.config,
            &checked,
            &entry.relative,
        )? {
            let located = columns.locate(&entry.path, 0, &file_name, &misspelling.word);
            outcome.record(&entry.path, 0, misspelling, located);
        }

        Ok(outcome)
    }
}
