//! Read/write command configuration shared by a store and its callers

use crate::domain::command::{
    CommandInvocation, CommandMode, Direction, OverridableCommand, DEFAULT_READ_COMMAND,
    DEFAULT_WRITE_COMMAND,
};
use crate::error::Result;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Environment variable overriding the read command
pub const READER_ENV: &str = "FILE_READER_CMD";

/// Environment variable overriding the write command
pub const WRITER_ENV: &str = "FILE_WRITER_CMD";

#[derive(Debug)]
struct Commands {
    read: OverridableCommand,
    write: OverridableCommand,
}

impl Commands {
    fn get(&self, direction: Direction) -> &OverridableCommand {
        match direction {
            Direction::Read => &self.read,
            Direction::Write => &self.write,
        }
    }

    fn get_mut(&mut self, direction: Direction) -> &mut OverridableCommand {
        match direction {
            Direction::Read => &mut self.read,
            Direction::Write => &mut self.write,
        }
    }
}

/// Active read and write command templates.
///
/// Each direction starts at its compiled-in default and accepts exactly one
/// non-blank override; later attempts are ignored. Whoever sets a direction
/// first wins, including the environment, which is applied by `from_env`
/// before any caller gets the object. One lock covers both directions.
#[derive(Debug)]
pub struct StoreConfig {
    commands: Mutex<Commands>,
    mode: CommandMode,
}

impl StoreConfig {
    /// Defaults only, nothing overridden
    pub fn new() -> Self {
        StoreConfig {
            commands: Mutex::new(Commands {
                read: OverridableCommand::new(DEFAULT_READ_COMMAND),
                write: OverridableCommand::new(DEFAULT_WRITE_COMMAND),
            }),
            mode: CommandMode::default(),
        }
    }

    /// Defaults, then `FILE_WRITER_CMD` and `FILE_READER_CMD` from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with a custom variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::new();
        if let Some(cmd) = lookup(WRITER_ENV) {
            if config.set_write_command(&cmd) {
                log::debug!("write command taken from {}", WRITER_ENV);
            }
        }
        if let Some(cmd) = lookup(READER_ENV) {
            if config.set_read_command(&cmd) {
                log::debug!("read command taken from {}", READER_ENV);
            }
        }
        config
    }

    /// Select how templates are turned into processes
    pub fn with_mode(mut self, mode: CommandMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> CommandMode {
        self.mode
    }

    /// Override the read command; no-op if blank or already overridden
    pub fn set_read_command(&self, cmd: &str) -> bool {
        self.set_command(Direction::Read, cmd)
    }

    /// Override the write command; no-op if blank or already overridden
    pub fn set_write_command(&self, cmd: &str) -> bool {
        self.set_command(Direction::Write, cmd)
    }

    pub fn set_command(&self, direction: Direction, cmd: &str) -> bool {
        self.lock().get_mut(direction).try_override(cmd)
    }

    pub fn read_command(&self) -> String {
        self.command(Direction::Read)
    }

    pub fn write_command(&self) -> String {
        self.command(Direction::Write)
    }

    pub fn command(&self, direction: Direction) -> String {
        self.lock().get(direction).value().to_string()
    }

    pub fn is_overridden(&self, direction: Direction) -> bool {
        self.lock().get(direction).is_locked()
    }

    /// Build the process invocation for `path` from the template active right now
    pub fn invocation(&self, direction: Direction, path: &Path) -> Result<CommandInvocation> {
        let template = self.command(direction);
        CommandInvocation::build(&template, path, self.mode)
    }

    // The guarded data is two strings and two flags, each replaced whole,
    // so a poisoned lock still holds a consistent value.
    fn lock(&self) -> MutexGuard<'_, Commands> {
        self.commands.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}
