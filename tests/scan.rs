use identspell::speller::{Dictionary, DictionarySpellchecker};
use identspell::{Config, ScanReport, Scanner};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn scan(root: &Path, config: Config) -> ScanReport {
    let dictionary = Dictionary::load_from_path(&fixtures().join("words.txt")).unwrap();
    let scanner = Scanner::new(
        Arc::new(config),
        Arc::new(DictionarySpellchecker::new(dictionary)),
    );
    scanner.scan(root).unwrap()
}

fn summary(report: &ScanReport, root: &Path) -> Vec<(String, String, usize, usize)> {
    let root = root.canonicalize().unwrap();
    report
        .issues
        .iter()
        .map(|issue| {
            (
                issue.file.strip_prefix(&root).unwrap().display().to_string(),
                issue.misspelling.word.clone(),
                issue.line,
                issue.column,
            )
        })
        .collect()
}

#[test]
fn test_project_with_typos() {
    let root = fixtures().join("project");
    let report = scan(&root, Config::default());

    let file = "ClassesToTest/ClassWithTypoErrors.php".to_string();
    let expected = vec![
        (file.clone(), "tst".to_string(), 8, 25),
        (file.clone(), "typoo".to_string(), 12, 31),
        (file.clone(), "typoo".to_string(), 12, 54),
        (file.clone(), "properyt".to_string(), 14, 16),
        (file.clone(), "metohd".to_string(), 17, 17),
        (file.clone(), "erorr".to_string(), 19, 34),
        (file.clone(), "erorr".to_string(), 19, 65),
        ("ClassesToTest/FolderWithTypoos".to_string(), "typoos".to_string(), 0, 10),
    ];

    assert_eq!(summary(&report, &root), expected);
    assert!(report.failures.is_empty());
    assert!(!report.is_pass());

    let properyt = &report.issues[3].misspelling;
    assert_eq!(properyt.suggestions.first().map(String::as_str), Some("property"));

    let typoos = &report.issues[7].misspelling;
    assert_eq!(typoos.suggestions.first().map(String::as_str), Some("typos"));
    assert!(typoos.suggestions.len() <= identspell::MAX_SUGGESTIONS);
}

#[test]
fn test_clean_project_passes() {
    let report = scan(&fixtures().join("clean"), Config::default());
    assert!(report.is_pass(), "{:?}", report.issues);
    assert_eq!(report.entries_scanned, 1);
}

#[test]
fn test_ignored_words_and_paths() {
    let root = fixtures().join("project");

    let mut config = Config::default();
    config.whitelisted_words.extend(["typoo".to_string(), "erorr".to_string()]);
    config
        .whitelisted_paths
        .push("ClassesToTest/FolderWithTypoos".to_string());

    let report = scan(&root, config);
    let words: Vec<String> = summary(&report, &root)
        .into_iter()
        .map(|(_, word, _, _)| word)
        .collect();

    assert_eq!(words, vec!["tst", "properyt", "metohd"]);
}

#[test]
fn test_scan_is_repeatable() {
    let root = fixtures().join("project");
    let first = scan(&root, Config::default());
    let second = scan(&root, Config::default());
    assert_eq!(first.issues, second.issues);
}

#[test]
fn test_enum_interface_trait_and_constant_declarations() {
    let root = fixtures().join("declarations");
    let report = scan(&root, Config::default());

    let constants = "ClassesToTest/ClassWithTypoOnConstants.php";
    let interface = "ClassesToTest/InterfaceWithSpellingMistake.php";
    let with_trait = "ClassesToTest/TraitWithTypo.php";
    let backed = "EnumsToTest/BackendEnumWithTypoErrors.php";
    let unit = "EnumsToTest/UnitEnumWithTypoErrors.php";

    let expected: Vec<(String, String, usize, usize)> = [
        (constants, "typoo", 11, 31),
        (constants, "typoo", 11, 54),
        (interface, "spellling", 8, 3),
        (interface, "erorr", 12, 34),
        (with_trait, "tst", 10, 25),
        (with_trait, "properyt", 19, 16),
        (with_trait, "spellling", 19, 28),
        (with_trait, "spellling", 26, 31),
        (with_trait, "spellling", 31, 67),
        (with_trait, "spellling", 42, 31),
        (backed, "spellling", 8, 30),
        (backed, "spellling", 13, 9),
        (backed, "spellling", 14, 43),
        (backed, "spellling", 21, 31),
        (backed, "spellling", 26, 67),
        (backed, "spellling", 37, 31),
        (unit, "spellling", 8, 30),
        (unit, "spellling", 13, 19),
        (unit, "spellling", 20, 31),
        (unit, "spellling", 25, 67),
        (unit, "spellling", 36, 31),
    ]
    .into_iter()
    .map(|(file, word, line, column)| (file.to_string(), word.to_string(), line, column))
    .collect();

    assert_eq!(summary(&report, &root), expected);
    assert!(report.failures.is_empty(), "{:?}", report.failures);

    let spellling = report
        .issues
        .iter()
        .find(|issue| issue.misspelling.word == "spellling")
        .unwrap();
    assert_eq!(
        spellling.misspelling.suggestions.first().map(String::as_str),
        Some("spelling")
    );
}
