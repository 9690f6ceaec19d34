use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::*;
use identspell::cache::{self, CachedSpellchecker, FileStore};
use identspell::cli::exit_status::ExitStatus;
use identspell::cli::output::{self, OutputFormat};
use identspell::config::CONFIG_FILE;
use identspell::error::ConfigError;
use identspell::speller::{Aspell, Dictionary, DictionarySpellchecker, SpellerKind};
use identspell::{dict, Config, Scanner, Spellchecker};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "identspell")]
#[command(
    version,
    about = "Finds misspelled words in identifiers, doc comments and file names",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(flatten)]
    check: CheckArgs,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug, Clone)]
struct CheckArgs {
    /// Project directory to scan
    #[arg(value_name = "PATH", default_value = ".")]
    path: PathBuf,

    /// Configuration file (defaults to identspell.json in PATH or the current directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Language to spellcheck in (overrides the configuration file)
    #[arg(short, long)]
    language: Option<String>,

    /// Spellchecking backend (aspell, dictionary)
    #[arg(long, default_value = "aspell")]
    speller: SpellerKind,

    /// Word list or .dict file for the dictionary backend
    #[arg(long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Do not read or write cached spellchecker results
    #[arg(long)]
    no_cache: bool,

    /// Cache directory
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Add every reported word to the configuration's ignore list
    #[arg(long)]
    ignore_all: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a project for misspellings (the default)
    Check(CheckArgs),
    /// Add words to the configuration's ignore list
    Ignore {
        #[arg(required = true, value_name = "WORDS")]
        words: Vec<String>,

        #[arg(short, long, value_name = "FILE", default_value = CONFIG_FILE)]
        config: PathBuf,
    },
    /// Write a default configuration file
    Init {
        #[arg(short, long, value_name = "FILE", default_value = CONFIG_FILE)]
        config: PathBuf,
    },
    /// Cached spellchecker results
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CacheCommands {
    /// Remove cached results
    Clear {
        /// Only clear one backend/language namespace (e.g. aspell-en_US)
        namespace: Option<String>,

        #[arg(long, value_name = "DIR")]
        cache_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Download a dictionary
    Download {
        /// Language code (e.g., en_US, en_GB)
        language: String,
    },
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "identspell", &mut io::stdout());
        return ExitStatus::Success.into();
    }

    let result = match cli.command {
        Some(command) => handle_command(command),
        None => run_check(cli.check),
    };

    match result {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitStatus::Error.into()
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn handle_command(command: Commands) -> Result<ExitStatus> {
    match command {
        Commands::Check(args) => run_check(args),
        Commands::Ignore { words, config } => {
            let added = Config::add_ignored_words(&config, &words)?;
            if added.is_empty() {
                println!("No new words to ignore.");
            } else {
                println!(
                    "{} Ignoring {} in {}",
                    "✓".green().bold(),
                    added.join(", ").cyan(),
                    config.display()
                );
            }
            Ok(ExitStatus::Success)
        }
        Commands::Init { config } => match Config::init(&config) {
            Ok(()) => {
                println!(
                    "  {} Configuration file {} created.",
                    " INFO ".on_blue().white().bold(),
                    config.display()
                );
                Ok(ExitStatus::Success)
            }
            Err(ConfigError::AlreadyExists(_)) => {
                println!(
                    "  {} Configuration file already exists.",
                    " INFO ".on_blue().white().bold()
                );
                Ok(ExitStatus::Failure)
            }
            Err(e) => Err(e.into()),
        },
        Commands::Cache { action } => match action {
            CacheCommands::Clear {
                namespace,
                cache_dir,
            } => {
                let root = resolve_cache_dir(cache_dir)?;
                let removed = cache::clear(&root, namespace.as_deref())?;
                println!(
                    "{} Removed {} cached {} from {}",
                    "✓".green().bold(),
                    removed,
                    if removed == 1 { "entry" } else { "entries" },
                    root.display()
                );
                Ok(ExitStatus::Success)
            }
        },
        Commands::Dict { action } => {
            match action {
                DictCommands::List => dict::manager::list_dictionaries()?,
                DictCommands::Download { language } => {
                    dict::manager::download_dictionary(&language)?
                }
                DictCommands::Info { language } => dict::manager::show_info(&language)?,
            }
            Ok(ExitStatus::Success)
        }
    }
}

fn run_check(args: CheckArgs) -> Result<ExitStatus> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut config = Config::load(args.config.as_deref(), &args.path)?;
    if let Some(language) = &args.language {
        config.language = language.clone();
    }

    let spellchecker = build_spellchecker(&args, &config.language)?;
    let config = Arc::new(config);
    let scanner = Scanner::new(config.clone(), spellchecker);

    let progress = progress_bar(args.format);
    let started = Instant::now();

    let report = scanner.scan_with_progress(
        &args.path,
        |total| progress.set_length(total as u64),
        || progress.inc(1),
    )?;
    progress.finish_and_clear();

    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", args.path.display()))?;

    output::print_report(&report, &root, args.format, !args.no_color, started.elapsed());

    if args.ignore_all && !report.issues.is_empty() {
        let path = config
            .source
            .clone()
            .unwrap_or_else(|| root.join(CONFIG_FILE));
        let words: Vec<&str> = report
            .issues
            .iter()
            .map(|issue| issue.misspelling.word.as_str())
            .collect();

        let added = Config::add_ignored_words(&path, &words)?;
        eprintln!(
            "{} Added {} {} to {}",
            "✓".green().bold(),
            added.len(),
            if added.len() == 1 { "word" } else { "words" },
            path.display()
        );
    }

    Ok(ExitStatus::from_report(&report))
}

fn build_spellchecker(args: &CheckArgs, language: &str) -> Result<Arc<dyn Spellchecker>> {
    let inner: Box<dyn Spellchecker> = match args.speller {
        SpellerKind::Aspell => Box::new(Aspell::new(language)),
        SpellerKind::Dictionary => {
            let dictionary = match &args.dictionary {
                Some(path) => Dictionary::load_from_path(path)?,
                None => Dictionary::load(language)?,
            };
            tracing::debug!(words = dictionary.len(), "dictionary loaded");
            Box::new(DictionarySpellchecker::new(dictionary))
        }
    };

    if args.no_cache {
        return Ok(Arc::from(inner));
    }

    // A custom word list gets its own namespace so its answers never mix
    // with the installed dictionary's.
    let namespace_language = args
        .dictionary
        .as_deref()
        .and_then(Path::file_stem)
        .map(|stem| format!("{}-{}", language, stem.to_string_lossy()))
        .unwrap_or_else(|| language.to_string());

    let root = resolve_cache_dir(args.cache_dir.clone())?;
    let dir = cache::namespace_dir(&root, inner.name(), &namespace_language);

    match FileStore::open(&dir) {
        Ok(store) => {
            tracing::debug!(dir = %dir.display(), "caching spellchecker results");
            Ok(Arc::new(CachedSpellchecker::new(inner, store)))
        }
        Err(e) => {
            tracing::warn!(error = %e, "cache unavailable, continuing without it");
            Ok(Arc::from(inner))
        }
    }
}

fn resolve_cache_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    explicit
        .or_else(Config::cache_dir)
        .context("Failed to get cache directory")
}

fn progress_bar(format: OutputFormat) -> ProgressBar {
    if format != OutputFormat::Text || !console::Term::stderr().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message("Scanning...");
    pb
}
