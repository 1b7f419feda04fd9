//! Error types for pipedit

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for pipedit
#[derive(Debug, Error)]
pub enum PipeditError {
    #[error("Temporary file error ({action}): {source}")]
    TempFile {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch editor '{program}': {source}")]
    EditorLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Editor '{program}' exited with {status}")]
    EditorExit { program: String, status: ExitStatus },

    #[error("Failed to read acknowledgment: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Command could not be parsed: {0}")]
    CommandParse(String),

    #[error("Failed to run '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for '{command}': {source}")]
    CommandWait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{output}: '{command}' exited with {status}")]
    ExternalCommand {
        command: String,
        status: ExitStatus,
        output: String,
    },

    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Failed to stream content to '{command}': {source}")]
    StdinWrite {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load config file {path}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipeditError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PipeditError::EditorLaunch { .. } | PipeditError::EditorExit { .. } => 2,
            PipeditError::CommandParse(_)
            | PipeditError::CommandSpawn { .. }
            | PipeditError::CommandWait { .. }
            | PipeditError::ExternalCommand { .. }
            | PipeditError::InvalidUtf8Output { .. }
            | PipeditError::StdinWrite { .. } => 3,
            PipeditError::Config(_) | PipeditError::ConfigFile { .. } => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            PipeditError::EditorLaunch { .. } | PipeditError::EditorExit { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Set `editor` in the pipedit config file",
                    self
                )
            }
            PipeditError::ExternalCommand { .. } | PipeditError::CommandSpawn { .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • The default commands use gpg; check that a secret key is available\n\
                    • Override the reader with FILE_READER_CMD (e.g., FILE_READER_CMD=\"cat\")\n\
                    • Override the writer with FILE_WRITER_CMD (e.g., FILE_WRITER_CMD=\"cat >\")\n\
                    • Run 'pipedit config' to see the active commands",
                    self
                )
            }
            PipeditError::CommandParse(_) => {
                format!(
                    "{}\n\n\
                    Argument-vector mode splits commands like a POSIX shell but never runs one.\n\
                    Check quoting, or drop --argv to use shell mode.",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using PipeditError
pub type Result<T> = std::result::Result<T, PipeditError>;
