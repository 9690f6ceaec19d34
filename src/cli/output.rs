use crate::error::LocalizationFailure;
use crate::{Issue, ScanReport};
use colored::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonIssue {
    file: String,
    line: usize,
    column: usize,
    word: String,
    suggestions: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonFailure {
    file: String,
    line: usize,
    word: String,
}

#[derive(Debug, Serialize)]
struct JsonOutput {
    entries_scanned: usize,
    total_issues: usize,
    issues: Vec<JsonIssue>,
    failures: Vec<JsonFailure>,
}

/// Print a scan report to stdout.
pub fn print_report(report: &ScanReport, root: &Path, format: OutputFormat, colored: bool, elapsed: Duration) {
    match format {
        OutputFormat::Text => print!("{}", render_text(report, root, colored, elapsed)),
        OutputFormat::Json => match render_json(report, root) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "failed to encode report"),
        },
    }
}

pub fn render_json(report: &ScanReport, root: &Path) -> serde_json::Result<String> {
    let output = JsonOutput {
        entries_scanned: report.entries_scanned,
        total_issues: report.issues.len(),
        issues: report
            .issues
            .iter()
            .map(|issue| JsonIssue {
                file: display_path(&issue.file, root),
                line: issue.line,
                column: issue.column,
                word: issue.misspelling.word.clone(),
                suggestions: issue.misspelling.suggestions.clone(),
            })
            .collect(),
        failures: report
            .failures
            .iter()
            .map(|f| JsonFailure {
                file: display_path(&f.file, root),
                line: f.line,
                word: f.word.clone(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Human-readable report: one block per issue, then a summary.
pub fn render_text(report: &ScanReport, root: &Path, colored: bool, elapsed: Duration) -> String {
    let mut out = String::new();
    let mut sources = SourceLines::default();

    out.push('\n');

    for issue in &report.issues {
        if issue.is_path_level() {
            render_path_issue(&mut out, issue, root, colored);
        } else {
            let line = sources.line(&issue.file, issue.line).unwrap_or_default();
            render_line_issue(&mut out, issue, root, &line, colored);
        }
    }

    for failure in &report.failures {
        render_failure(&mut out, failure, root, colored);
    }

    if report.is_pass() {
        let badge = if colored {
            " PASS ".on_green().white().bold().to_string()
        } else {
            "PASS ".to_string()
        };
        out.push_str(&format!("  {} No misspellings found in your project.\n", badge));
    } else {
        let count = report.issues.len();
        let noun = if count == 1 { "misspelling" } else { "misspellings" };
        let summary = format!("{} {} found", count, noun);
        if colored {
            out.push_str(&format!("  {} {}\n", "✗".red().bold(), summary.red().bold()));
        } else {
            out.push_str(&format!("  ✗ {}\n", summary));
        }
    }

    let duration = format!("Duration: {:.2}s", elapsed.as_secs_f64());
    if colored {
        out.push_str(&format!("  {}\n\n", duration.dimmed()));
    } else {
        out.push_str(&format!("  {}\n\n", duration));
    }

    out
}

fn issue_header(out: &mut String, location: &str, word: &str, colored: bool) {
    if colored {
        out.push_str(&format!(
            "  {} Misspelling in {}: '{}'\n",
            " ISSUE ".on_red().white().bold(),
            location.bold(),
            word.bold()
        ));
    } else {
        out.push_str(&format!("  ISSUE  Misspelling in {}: '{}'\n", location, word));
    }
}

fn suggestions_line(out: &mut String, issue: &Issue, capitalized: bool, colored: bool) {
    let suggestions = format_suggestions(&issue.misspelling.suggestions, capitalized);
    if colored {
        out.push_str(&format!("  {} {}\n\n", "Did you mean:".dimmed(), suggestions.bold()));
    } else {
        out.push_str(&format!("  Did you mean: {}\n\n", suggestions));
    }
}

fn caret(out: &mut String, offset: usize, colored: bool) {
    let marker = format!("{}^", "-".repeat(offset));
    if colored {
        out.push_str(&format!("  {}\n", marker.red().bold()));
    } else {
        out.push_str(&format!("  {}\n", marker));
    }
}

fn render_line_issue(out: &mut String, issue: &Issue, root: &Path, source: &str, colored: bool) {
    let location = format!("{}:{}:{}", display_path(&issue.file, root), issue.line, issue.column);
    issue_header(out, &location, &issue.misspelling.word, colored);

    out.push_str(&format!("  {}\n", source));
    caret(out, char_offset(source, issue.column), colored);

    suggestions_line(out, issue, is_uppercase_at(source, issue.column), colored);
}

fn render_path_issue(out: &mut String, issue: &Issue, root: &Path, colored: bool) {
    let shown = display_path(&issue.file, root);
    issue_header(out, &shown, &issue.misspelling.word, colored);

    let file_name = issue
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Column indexes the file name, which ends the displayed path.
    let name_start = shown.chars().count().saturating_sub(file_name.chars().count());

    if colored {
        out.push_str(&format!("  {}\n", shown.blue().bold()));
    } else {
        out.push_str(&format!("  {}\n", shown));
    }
    caret(out, name_start + char_offset(&file_name, issue.column), colored);

    suggestions_line(out, issue, is_uppercase_at(&file_name, issue.column), colored);
}

fn render_failure(out: &mut String, failure: &LocalizationFailure, root: &Path, colored: bool) {
    let message = format!(
        "could not locate '{}' on line {} of {}",
        failure.word,
        failure.line,
        display_path(&failure.file, root)
    );
    if colored {
        out.push_str(&format!("  {} {}\n\n", " WARN ".on_yellow().black().bold(), message));
    } else {
        out.push_str(&format!("  WARN  {}\n\n", message));
    }
}

/// `./relative/path` when under `root`, the path as-is otherwise.
pub fn display_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => format!("./{}", relative.display()),
        Err(_) => path.display().to_string(),
    }
}

pub fn format_suggestions(suggestions: &[String], capitalized: bool) -> String {
    if suggestions.is_empty() {
        return "no suggestions".to_string();
    }

    suggestions
        .iter()
        .map(|s| if capitalized { capitalize(s) } else { s.clone() })
        .collect::<Vec<_>>()
        .join(", ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_uppercase_at(text: &str, column: usize) -> bool {
    text.get(column..)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

/// Number of characters before byte `column`, for aligning the caret.
fn char_offset(text: &str, column: usize) -> usize {
    text.get(..column)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(column)
}

/// Source files read on demand while rendering.
#[derive(Default)]
struct SourceLines {
    files: HashMap<PathBuf, Vec<String>>,
}

impl SourceLines {
    fn line(&mut self, file: &Path, line: usize) -> Option<String> {
        let lines = self.files.entry(file.to_path_buf()).or_insert_with(|| {
            fs::read_to_string(file)
                .map(|content| content.lines().map(str::to_string).collect())
                .unwrap_or_default()
        });

        line.checked_sub(1).and_then(|i| lines.get(i)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Misspelling;
    use tempfile::tempdir;

    fn issue(file: PathBuf, line: usize, column: usize, word: &str, suggestions: &[&str]) -> Issue {
        Issue {
            misspelling: Misspelling::new(word, suggestions.iter().map(|s| s.to_string())),
            file,
            line,
            column,
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_pass_message() {
        let text = render_text(&ScanReport::default(), Path::new("/p"), false, Duration::ZERO);
        assert!(text.contains("PASS  No misspellings found in your project."));
        assert!(text.contains("Duration: 0.00s"));
    }

    #[test]
    fn test_line_issue_rendering() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Model.php");
        fs::write(&file, "<?php\n    public int $properytWithTypoError = 2;\n").unwrap();

        let report = ScanReport {
            issues: vec![issue(file, 2, 16, "properyt", &["property", "propriety"])],
            failures: Vec::new(),
            entries_scanned: 1,
        };

        let text = render_text(&report, dir.path(), false, Duration::ZERO);
        assert!(text.contains("ISSUE  Misspelling in ./Model.php:2:16: 'properyt'"));
        assert!(text.contains("  ----------------^\n"));
        assert!(text.contains("Did you mean: property, propriety"));
        assert!(text.contains("1 misspelling found"));
    }

    #[test]
    fn test_capitalized_suggestions() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("Model.php");
        fs::write(&file, "final class Metohd {}\n").unwrap();

        let report = ScanReport {
            issues: vec![issue(file, 1, 12, "metohd", &["method"])],
            ..Default::default()
        };

        let text = render_text(&report, dir.path(), false, Duration::ZERO);
        assert!(text.contains("Did you mean: Method"));
    }

    #[test]
    fn test_path_issue_rendering() {
        let root = Path::new("/project");
        let report = ScanReport {
            issues: vec![issue(
                PathBuf::from("/project/src/FolderWithTypoos"),
                0,
                10,
                "typoos",
                &["typos", "types"],
            )],
            ..Default::default()
        };

        let text = render_text(&report, root, false, Duration::ZERO);
        assert!(text.contains("ISSUE  Misspelling in ./src/FolderWithTypoos: 'typoos'"));
        // "./src/" is 6 characters, the word starts 10 into the name
        assert!(text.contains(&format!("  {}^\n", "-".repeat(16))));
        assert!(text.contains("Did you mean: Typos, Types"));
    }

    #[test]
    fn test_failures_are_reported() {
        let report = ScanReport {
            failures: vec![LocalizationFailure {
                file: PathBuf::from("/p/A.php"),
                line: 3,
                word: "erorr".to_string(),
            }],
            ..Default::default()
        };

        let text = render_text(&report, Path::new("/p"), false, Duration::ZERO);
        assert!(text.contains("WARN  could not locate 'erorr' on line 3 of ./A.php"));
    }

    #[test]
    fn test_json_report() {
        let report = ScanReport {
            issues: vec![issue(PathBuf::from("/p/src/A.php"), 4, 2, "erorr", &["error"])],
            entries_scanned: 3,
            ..Default::default()
        };

        let json: serde_json::Value =
            serde_json::from_str(&render_json(&report, Path::new("/p")).unwrap()).unwrap();

        assert_eq!(json["total_issues"], 1);
        assert_eq!(json["entries_scanned"], 3);
        assert_eq!(json["issues"][0]["file"], "./src/A.php");
        assert_eq!(json["issues"][0]["suggestions"][0], "error");
    }

    #[test]
    fn test_suggestion_helpers() {
        assert_eq!(format_suggestions(&[], true), "no suggestions");
        assert_eq!(capitalize("élan"), "Élan");
        assert!(is_uppercase_at("fooBar", 3));
        assert!(!is_uppercase_at("fooBar", 30));
        assert_eq!(char_offset("é_x", 3), 2);
    }
}
