//! CLI command definitions

use crate::domain::CommandMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pipedit")]
#[command(
    about = "Edit and store files through external commands (gpg by default)",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $PIPEDIT_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read command, used only if FILE_READER_CMD and the config file leave it unset
    #[arg(long, global = true, value_name = "CMD")]
    pub reader_cmd: Option<String>,

    /// Write command, used only if FILE_WRITER_CMD and the config file leave it unset
    #[arg(long, global = true, value_name = "CMD")]
    pub writer_cmd: Option<String>,

    /// How commands run: "shell" (sh -c) or "argv" (no shell, path as its own argument)
    #[arg(long, global = true, value_name = "MODE")]
    pub mode: Option<CommandMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a stored file in $EDITOR and save it back
    Edit {
        /// File to edit
        path: PathBuf,

        /// Require the result to be valid JSON; reopen the editor until it is
        #[arg(long)]
        json: bool,

        /// Start from empty content if the file does not exist
        #[arg(long)]
        create: bool,
    },

    /// Print a stored file
    Cat {
        /// File to read
        path: PathBuf,
    },

    /// Store content read from stdin
    Write {
        /// File to write
        path: PathBuf,
    },

    /// Show the active read/write commands
    Config,
}
