//! Domain layer - Command templates, store configuration, and the edit loop

pub mod command;
pub mod edit_loop;
pub mod store_config;

pub use command::{CommandInvocation, CommandMode, Direction, OverridableCommand};
pub use edit_loop::{edit_in_place, edit_structured, Acknowledge, EditState, TextEditor};
pub use store_config::StoreConfig;
