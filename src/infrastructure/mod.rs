//! Infrastructure layer - Subprocesses, temp files, and config files

pub mod config;
pub mod editor;
pub mod store;

pub use config::Config;
pub use editor::{ExternalEditor, TerminalPrompt};
pub use store::{CommandFileStore, FileStore};
