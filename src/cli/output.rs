//! Output formatting utilities

use crate::application::EditOutcome;
use crate::domain::{Direction, StoreConfig};
use std::path::Path;

/// Format the active commands, one `key = value` per line
pub fn format_config(config: &StoreConfig, editor: &str) -> String {
    let mut output = String::new();
    for direction in [Direction::Read, Direction::Write] {
        let origin = if config.is_overridden(direction) {
            "override"
        } else {
            "default"
        };
        output.push_str(&format!(
            "{} = {}  ({})\n",
            direction,
            config.command(direction),
            origin
        ));
    }
    output.push_str(&format!("mode = {}\n", config.mode()));
    output.push_str(&format!("editor = {}\n", editor));
    output
}

/// Format the result of an edit for display
pub fn format_edit_outcome(outcome: EditOutcome, path: &Path) -> String {
    match outcome {
        EditOutcome::Unchanged => format!("No changes to {}", path.display()),
        EditOutcome::Written => format!("Saved {}", path.display()),
    }
}
