//! Command templates and the invocations built from them

use crate::error::{PipeditError, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::fmt;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

/// Encrypts to the first secret key found in the local keyring.
pub const DEFAULT_WRITE_COMMAND: &str = "gpg --yes --encrypt --recipient $(gpg --list-secret-keys --with-colons | head -1 | cut -d: -f5) -o";

/// Decrypts quietly to stdout.
pub const DEFAULT_READ_COMMAND: &str = "gpg -d -q";

/// Which way content flows through a configured command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => write!(f, "read"),
            Direction::Write => write!(f, "write"),
        }
    }
}

/// How a template and a path become a process.
///
/// `Shell` hands `"<template> <path>"` to `sh -c`, so templates may use
/// pipelines and command substitution. The path is spliced into a shell
/// command line and must come from a trusted source.
///
/// `Argv` splits the template into words and passes the path as one extra
/// argument without any shell involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandMode {
    #[default]
    Shell,
    Argv,
}

impl FromStr for CommandMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shell" | "sh" => Ok(CommandMode::Shell),
            "argv" => Ok(CommandMode::Argv),
            other => Err(format!(
                "Unknown command mode: '{}'. Valid modes are: shell, argv",
                other
            )),
        }
    }
}

impl fmt::Display for CommandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandMode::Shell => write!(f, "shell"),
            CommandMode::Argv => write!(f, "argv"),
        }
    }
}

/// A command template that may be changed away from its default once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverridableCommand {
    value: String,
    locked: bool,
}

impl OverridableCommand {
    pub fn new(default: &str) -> Self {
        OverridableCommand {
            value: default.to_string(),
            locked: false,
        }
    }

    /// Replace the template if `cmd` is not blank and no override happened yet.
    /// Returns whether the value changed hands.
    pub fn try_override(&mut self, cmd: &str) -> bool {
        if self.locked || cmd.trim().is_empty() {
            return false;
        }
        self.value = cmd.to_string();
        self.locked = true;
        true
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

/// A program and its arguments, ready to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl CommandInvocation {
    /// Build the invocation for `template` applied to `path`.
    /// Path bytes are passed through untouched, UTF-8 or not.
    pub fn build(template: &str, path: &Path, mode: CommandMode) -> Result<Self> {
        match mode {
            CommandMode::Shell => {
                let mut script = OsString::from(template);
                script.push(" ");
                script.push(path.as_os_str());
                Ok(CommandInvocation {
                    program: "sh".to_string(),
                    args: vec![OsString::from("-c"), script],
                })
            }
            CommandMode::Argv => {
                let mut words = shlex::split(template)
                    .ok_or_else(|| PipeditError::CommandParse(template.to_string()))?;
                if words.is_empty() {
                    return Err(PipeditError::CommandParse(template.to_string()));
                }
                let program = words.remove(0);
                let mut args: Vec<OsString> = words.into_iter().map(OsString::from).collect();
                args.push(path.as_os_str().to_os_string());
                Ok(CommandInvocation { program, args })
            }
        }
    }

    /// Human-readable command line, quoted the way a shell would need it.
    /// For messages only: non-UTF-8 bytes are shown replaced.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|arg| arg.to_string_lossy().into_owned()))
            .map(|word| {
                shlex::try_quote(&word)
                    .map(|quoted| quoted.into_owned())
                    .unwrap_or_else(|_| word.clone())
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}
