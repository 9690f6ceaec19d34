use crate::error::SpellcheckError;
use crate::speller::Spellchecker;
use crate::Misspelling;
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

/// GNU Aspell driven through its ispell-compatible pipe mode (`aspell -a`).
///
/// One process is spawned per check; results are cached upstream, so each
/// distinct text reaches Aspell at most once per cache lifetime.
#[derive(Debug, Clone)]
pub struct Aspell {
    program: String,
    language: String,
}

impl Default for Aspell {
    fn default() -> Self {
        Self::new("en_US")
    }
}

impl Aspell {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            program: "aspell".to_string(),
            language: language.into(),
        }
    }

    /// Use a different executable, e.g. an absolute path.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn args(&self) -> Vec<String> {
        vec![
            "--encoding".to_string(),
            "utf-8".to_string(),
            "-a".to_string(),
            "--ignore-case".to_string(),
            format!("--lang={}", self.language),
        ]
    }

    fn run(&self, text: &str) -> Result<String, SpellcheckError> {
        let mut child = Command::new(&self.program)
            .args(self.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SpellcheckError::Unavailable {
                program: self.program.clone(),
                reason: e.to_string(),
            })?;

        // `^` makes aspell treat every line as data, never as a pipe command.
        let input: String = text.lines().map(|line| format!("^{line}\n")).collect();

        let stdin = child.stdin.take();
        let writer = thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });

        let output = child
            .wait_with_output()
            .map_err(|e| SpellcheckError::Failed {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        let written = writer.join().map_err(|_| SpellcheckError::Failed {
            program: self.program.clone(),
            message: "input writer panicked".to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpellcheckError::Failed {
                program: self.program.clone(),
                message: format!("{} ({})", stderr.trim(), output.status),
            });
        }

        written.map_err(|e| SpellcheckError::Failed {
            program: self.program.clone(),
            message: e.to_string(),
        })?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Spellchecker for Aspell {
    fn check(&self, text: &str) -> Result<Vec<Misspelling>, SpellcheckError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(program = %self.program, bytes = text.len(), "running spellchecker");
        let output = self.run(text)?;

        Ok(parse_output(&output))
    }

    fn name(&self) -> &str {
        "aspell"
    }
}

/// Parse ispell pipe-mode output.
///
/// `& word count offset: s1, s2, ...` is a miss with suggestions and
/// `# word offset` a miss without any. Everything else (the version banner,
/// `*` hits, blank separators) is ignored.
pub fn parse_output(output: &str) -> Vec<Misspelling> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim_end();
            if let Some(rest) = line.strip_prefix("& ") {
                let (meta, suggestions) = rest.split_once(':')?;
                let word = meta.split_whitespace().next()?;
                let suggestions = suggestions
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
                Some(Misspelling::new(word, suggestions))
            } else if let Some(rest) = line.strip_prefix("# ") {
                let word = rest.split_whitespace().next()?;
                Some(Misspelling::new(word, Vec::new()))
            } else {
                None
            }
        })
        .collect()
}
