use crate::config::Config;
use crate::speller::Dictionary;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

// Pinned commit so a download always builds the same dictionary
const WORDLIST_BASE_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/6e4bc58ad764c3e6df8b5be4048671962c9d6a23";
const WORDLIST_VERSION: &str = "2023.12";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryInfo {
    pub language: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

fn data_dir() -> Result<PathBuf> {
    Config::data_dir().context("Failed to get data directory")
}

/// Installed `.dict` files in `dir`, sorted by language.
pub fn installed_dictionaries(dir: &Path) -> Result<Vec<DictionaryInfo>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();

        if path.extension().and_then(|s| s.to_str()) != Some("dict") {
            continue;
        }

        let Some(language) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        found.push(DictionaryInfo {
            language: language.to_string(),
            size_bytes: fs::metadata(&path)?.len(),
            path,
        });
    }

    found.sort_by(|a, b| a.language.cmp(&b.language));
    Ok(found)
}

pub fn list_dictionaries() -> Result<()> {
    let data_dir = data_dir()?;
    let installed = installed_dictionaries(&data_dir)?;

    if installed.is_empty() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to download a dictionary.",
            "identspell dict download en_US".cyan()
        );
        return Ok(());
    }

    println!("{}", "Installed dictionaries:".bold());
    println!();

    for info in &installed {
        println!(
            "  {} {} ({})",
            "✓".green(),
            info.language.cyan().bold(),
            format!("{}KB", info.size_bytes / 1024).dimmed()
        );
    }

    println!();
    println!(
        "Data directory: {}",
        data_dir.display().to_string().dimmed()
    );

    Ok(())
}

pub fn wordlist_url(language: &str) -> Result<String> {
    match language {
        "en_US" | "en_GB" => Ok(format!("{}/words_alpha.txt", WORDLIST_BASE_URL)),
        other => anyhow::bail!(
            "Language '{}' is not supported. Only 'en_US' and 'en_GB' are currently available.",
            other
        ),
    }
}

/// One lowercase word per non-empty line; single letters are dropped.
pub fn parse_wordlist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| line.chars().count() > 1 && !line.starts_with('#'))
        .collect()
}

pub fn download_dictionary(language: &str) -> Result<()> {
    let wordlist_url = wordlist_url(language)?;

    println!(
        "{} dictionary for {} (version: {})...",
        "Downloading".cyan().bold(),
        language.yellow(),
        WORDLIST_VERSION.dimmed()
    );

    let data_dir = data_dir()?;
    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    println!("Source: {}", wordlist_url.dimmed());
    tracing::debug!(url = %wordlist_url, "fetching word list");

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.set_message("Downloading...");

    let response =
        reqwest::blocking::get(&wordlist_url).context("Failed to download dictionary")?;

    if !response.status().is_success() {
        pb.abandon();
        anyhow::bail!("Failed to download dictionary: HTTP {}", response.status());
    }

    let content = response.text()?;
    pb.finish_with_message("Download complete");

    println!("{}", "Building dictionary...".cyan());
    let words = parse_wordlist(&content);
    println!("Found {} words", words.len().to_string().yellow());

    let dict_path = data_dir.join(format!("{}.dict", language));
    Dictionary::build_from_words(&words, &dict_path)?;

    println!(
        "{} Dictionary installed: {}",
        "✓".green().bold(),
        dict_path.display().to_string().cyan()
    );

    Ok(())
}

pub fn show_info(language: &str) -> Result<()> {
    let dict_path = data_dir()?.join(format!("{}.dict", language));

    if !dict_path.exists() {
        println!(
            "{} Dictionary for {} not found.",
            "✗".red().bold(),
            language.yellow()
        );
        println!(
            "Run {} to download it.",
            format!("identspell dict download {}", language).cyan()
        );
        return Ok(());
    }

    let metadata = fs::metadata(&dict_path)?;

    println!("{}", format!("Dictionary: {}", language).bold());
    println!("  Path: {}", dict_path.display());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Version: {}", WORDLIST_VERSION);
    println!("  Format: FST (Finite State Transducer)");

    match Dictionary::load_from_path(&dict_path) {
        Ok(dict) => println!("  Words: {}", dict.len().to_string().yellow()),
        Err(e) => println!("  {}: {}", "Error loading dictionary".red(), e),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_installed_dictionaries() {
        let dir = tempdir().unwrap();
        Dictionary::build_from_words(
            &["method".to_string(), "error".to_string()],
            &dir.path().join("en_US.dict"),
        )
        .unwrap();
        Dictionary::build_from_words(&["fehler".to_string()], &dir.path().join("de_DE.dict"))
            .unwrap();
        fs::write(dir.path().join("notes.txt"), "not a dictionary").unwrap();

        let installed = installed_dictionaries(dir.path()).unwrap();
        let languages: Vec<&str> = installed.iter().map(|i| i.language.as_str()).collect();

        assert_eq!(languages, vec!["de_DE", "en_US"]);
        assert!(installed.iter().all(|i| i.size_bytes > 0));
    }

    #[test]
    fn test_missing_data_dir() {
        let dir = tempdir().unwrap();
        assert!(installed_dictionaries(&dir.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_wordlist() {
        let words = parse_wordlist("Method\n\n a\n# comment\nerror  \r\n");
        assert_eq!(words, vec!["method", "error"]);
    }

    #[test]
    fn test_wordlist_url() {
        assert!(wordlist_url("en_GB").unwrap().ends_with("/words_alpha.txt"));
        assert!(wordlist_url("fr_FR").is_err());
    }
}
