//! Configuration file loading

use crate::domain::{CommandMode, StoreConfig};
use crate::error::{PipeditError, Result};
use crate::infrastructure::ExternalEditor;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "PIPEDIT_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub mode: Option<CommandMode>,
    #[serde(default)]
    pub commands: CommandsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandsConfig {
    #[serde(default)]
    pub read: Option<String>,
    #[serde(default)]
    pub write: Option<String>,
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PipeditError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        toml::from_str(&contents).map_err(|source| PipeditError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit file if given, else the one named by `PIPEDIT_CONFIG`, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit.map(Path::to_path_buf).or_else(|| {
            std::env::var(CONFIG_ENV)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
        });

        match path {
            Some(path) => {
                log::debug!("loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Config::default()),
        }
    }

    /// Offer the file's commands to `store`. Directions already overridden keep their value.
    pub fn apply_commands(&self, store: &StoreConfig) {
        if let Some(cmd) = &self.commands.read {
            store.set_read_command(cmd);
        }
        if let Some(cmd) = &self.commands.write {
            store.set_write_command(cmd);
        }
    }

    /// Editor from the file when set, otherwise from the environment
    pub fn editor(&self) -> ExternalEditor {
        match self.editor.as_deref().filter(|e| !e.trim().is_empty()) {
            Some(cmd) => ExternalEditor::new(cmd.to_string()),
            None => ExternalEditor::from_env(),
        }
    }
}
