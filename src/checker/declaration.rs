use super::{find_misspellings, CheckOutcome, Checker, Entry};
use crate::error::SpellcheckError;
use crate::localizer::ColumnTracker;
use crate::parser::{self, Located, SourceLang, TypeDecl};
use crate::speller::Spellchecker;
use crate::Config;
use std::fs;
use std::sync::Arc;

/// Spellchecks the declarations of the type a PHP file is named after.
///
/// Only files with a `namespace` declaration and a class, interface, trait
/// or enum named like the file stem are checked, mirroring PSR-4 autoloading.
/// Inherited members are never reported: only text written in this file is
/// scanned.
pub struct DeclarationChecker {
    config: Arc<Config>,
    spellchecker: Arc<dyn Spellchecker>,
}

impl DeclarationChecker {
    pub fn new(config: Arc<Config>, spellchecker: Arc<dyn Spellchecker>) -> Self {
        Self {
            config,
            spellchecker,
        }
    }
}

/// Checkable texts of a type, in source order.
pub fn candidates(decl: &TypeDecl) -> Vec<&Located> {
    let mut texts: Vec<&Located> = decl.doc.iter().collect();

    for member in &decl.members {
        texts.extend(&member.doc);
        texts.push(&member.name);
        texts.extend(&member.params);
        texts.extend(&member.value);
    }

    texts
}

impl Checker for DeclarationChecker {
    fn name(&self) -> &'static str {
        "declaration"
    }

    fn supports(&self, entry: &Entry) -> bool {
        entry.is_file()
            && SourceLang::from_path(&entry.path) == Some(SourceLang::Php)
            && !self.config.is_path_ignored(&entry.relative)
    }

    fn check(&self, entry: &Entry, columns: &ColumnTracker) -> Result<CheckOutcome, SpellcheckError> {
        let mut outcome = CheckOutcome::default();

        let content = match fs::read_to_string(&entry.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %entry.path.display(), error = %e, "skipping unreadable file");
                return Ok(outcome);
            }
        };

        let Some(outline) = parser::parse_file(&entry.path, &content) else {
            return Ok(outcome);
        };

        let stem = entry
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(decl) = outline
            .namespace
            .as_ref()
            .and_then(|_| outline.find_type(&stem))
        else {
            tracing::debug!(path = %entry.path.display(), "no namespaced type named after the file");
            return Ok(outcome);
        };

        let lines: Vec<&str> = content.lines().collect();

        for text in candidates(decl) {
            for misspelling in find_misspellings(
                self.spellchecker.as_ref(),
                &self.config,
                &text.text,
                &entry.relative,
            )? {
                let located = columns.locate_in_lines(&entry.path, &lines, text.line, &misspelling.word);
                outcome.record(&entry.path, text.line, misspelling, located);
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::test_support::StubSpellchecker;
    use crate::checker::EntryKind;
    use std::path::Path;
    use tempfile::tempdir;

    const CLASS: &str = "<?php

declare(strict_types=1);

namespace Tests\\Fixtures;

/**
 * This class is used to tst things.
 */
final class ClassWithTypoErrors
{
    public const CONSTANT_WITH_TYPOO = 'constant_with_typoo';

    public int $properytWithTypoError = 2;

    /**
     * This is a metohd with a doc block typo error
     */
    public function methodWithTypoErorr(string $parameterWithTypoErorr): string
    {
        $localVariableWithTypoo = 'not checked';

        return 'This is a method with a typo error';
    }
}
";

    fn checker(config: Config) -> DeclarationChecker {
        DeclarationChecker::new(
            Arc::new(config),
            Arc::new(StubSpellchecker::new(&[
                ("tst", &["test", "st"]),
                ("typoo", &["typo"]),
                ("properyt", &["property", "propriety"]),
                ("metohd", &["method"]),
                ("erorr", &["error"]),
            ])),
        )
    }

    fn write_fixture(dir: &Path, name: &str, content: &str) -> Entry {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        Entry::new(dir, path, EntryKind::File)
    }

    #[test]
    fn test_issues_in_source_order() {
        let dir = tempdir().unwrap();
        let entry = write_fixture(dir.path(), "ClassWithTypoErrors.php", CLASS);

        let outcome = checker(Config::default())
            .check(&entry, &ColumnTracker::new())
            .unwrap();

        assert!(outcome.failures.is_empty(), "{:?}", outcome.failures);

        let found: Vec<(&str, usize, usize)> = outcome
            .issues
            .iter()
            .map(|i| (i.misspelling.word.as_str(), i.line, i.column))
            .collect();

        assert_eq!(
            found,
            vec![
                ("tst", 8, 25),
                ("typoo", 12, 31),
                ("typoo", 12, 54),
                ("properyt", 14, 16),
                ("metohd", 17, 17),
                ("erorr", 19, 34),
                ("erorr", 19, 65),
            ]
        );
        assert_eq!(outcome.issues[3].misspelling.suggestions, vec!["property", "propriety"]);
    }

    #[test]
    fn test_file_must_be_named_after_a_namespaced_type() {
        let dir = tempdir().unwrap();
        let misnamed = write_fixture(dir.path(), "Other.php", CLASS);
        let no_namespace = write_fixture(
            dir.path(),
            "Global.php",
            "<?php\nclass Global\n{\n    public $erorr;\n}\n",
        );

        let checker = checker(Config::default());
        assert!(checker.check(&misnamed, &ColumnTracker::new()).unwrap().issues.is_empty());
        assert!(checker
            .check(&no_namespace, &ColumnTracker::new())
            .unwrap()
            .issues
            .is_empty());
    }

    #[test]
    fn test_supports_php_files_only() {
        let mut config = Config::default();
        config.whitelisted_paths.push("legacy".to_string());
        let checker = checker(config);

        let php = Entry::new(Path::new("/p"), "/p/src/Foo.php".into(), EntryKind::File);
        let text = Entry::new(Path::new("/p"), "/p/src/Foo.txt".into(), EntryKind::File);
        let legacy = Entry::new(Path::new("/p"), "/p/legacy/Foo.php".into(), EntryKind::File);

        assert!(checker.supports(&php));
        assert!(!checker.supports(&text));
        assert!(!checker.supports(&legacy));
    }

    #[test]
    fn test_per_file_ignored_words() {
        let dir = tempdir().unwrap();
        let entry = write_fixture(dir.path(), "ClassWithTypoErrors.php", CLASS);

        let mut config = Config::default();
        config.file_words.insert(
            "ClassWithTypoErrors.php".to_string(),
            ["typoo".to_string(), "erorr".to_string()].into(),
        );

        let outcome = checker(config).check(&entry, &ColumnTracker::new()).unwrap();
        let words: Vec<&str> = outcome.issues.iter().map(|i| i.misspelling.word.as_str()).collect();
        assert_eq!(words, vec!["tst", "properyt", "metohd"]);
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let entry = Entry::new(
            Path::new("/nonexistent"),
            "/nonexistent/Missing.php".into(),
            EntryKind::File,
        );
        let outcome = checker(Config::default())
            .check(&entry, &ColumnTracker::new())
            .unwrap();
        assert!(outcome.issues.is_empty());
    }
}
