//! External editor integration

use crate::domain::{Acknowledge, TextEditor};
use crate::error::{PipeditError, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// Editor used when `EDITOR` is unset or blank
pub const DEFAULT_EDITOR: &str = "vi";

const TEMP_PREFIX: &str = "pipedit-";

/// Opens content in the user's editor through a private temp file
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
    suffix: String,
}

impl ExternalEditor {
    /// Create an editor with the given command
    pub fn new(editor_command: String) -> Self {
        ExternalEditor {
            command: editor_command,
            suffix: ".txt".to_string(),
        }
    }

    /// Resolve the editor from `EDITOR`, falling back to `vi`
    pub fn from_env() -> Self {
        Self::new(Self::detect_editor(std::env::var("EDITOR").ok()))
    }

    /// Extension given to the temp file, so editors can pick a syntax
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn detect_editor(env_value: Option<String>) -> String {
        env_value
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
    }

    /// Run the editor on `file_path` and wait for it to exit.
    /// The editor shares our stdin and stdout; its stderr is discarded.
    fn launch(&self, file_path: &Path) -> Result<()> {
        let (program, args) = self.parse_command();

        log::debug!(
            "launching editor: {} {:?} {}",
            program,
            args,
            file_path.display()
        );
        let status = Command::new(&program)
            .args(&args)
            .arg(file_path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| PipeditError::EditorLaunch {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PipeditError::EditorExit { program, status });
        }
        Ok(())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> (String, Vec<String>) {
        let parts = shlex::split(&self.command).unwrap_or_else(|| {
            self.command
                .split_whitespace()
                .map(|s| s.to_string())
                .collect()
        });

        let mut parts = parts.into_iter();
        match parts.next() {
            Some(program) => (program, parts.collect()),
            None => (DEFAULT_EDITOR.to_string(), vec![]),
        }
    }
}

impl TextEditor for ExternalEditor {
    fn edit_text(&self, content: &str) -> Result<String> {
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(&self.suffix)
            .tempfile()
            .map_err(|source| PipeditError::TempFile {
                action: "create",
                source,
            })?;

        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| PipeditError::TempFile {
                action: "write",
                source,
            })?;

        // Close our handle; the path is removed when `temp_path` drops
        let temp_path = file.into_temp_path();
        log::trace!("edit session file: {}", temp_path.display());

        self.launch(&temp_path)?;

        let edited = fs::read_to_string(&temp_path).map_err(|source| PipeditError::TempFile {
            action: "read",
            source,
        })?;

        temp_path.close().map_err(|source| PipeditError::TempFile {
            action: "remove",
            source,
        })?;

        Ok(edited)
    }
}

/// Prints parse diagnostics and waits for Enter on stdin
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        TerminalPrompt::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalPrompt { input, output }
    }
}

impl<R: BufRead, W: Write> Acknowledge for TerminalPrompt<R, W> {
    fn acknowledge(&mut self, diagnostic: &str) -> Result<()> {
        write!(self.output, "{}\nPress enter to edit", diagnostic)
            .and_then(|_| self.output.flush())
            .map_err(PipeditError::Prompt)?;

        // End of input counts as Enter
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .map_err(PipeditError::Prompt)?;
        Ok(())
    }
}
