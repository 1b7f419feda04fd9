//! Edit stored file use case

use crate::domain::edit_loop::to_pretty_json;
use crate::domain::{Acknowledge, EditState, TextEditor};
use crate::error::Result;
use crate::infrastructure::FileStore;
use serde_json::Value;
use std::path::Path;

/// How the file content is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditFormat {
    /// Free-form text, written back as-is
    Text,
    /// Must parse as JSON before it is accepted
    Json,
}

/// What an edit did to the stored file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    Written,
}

/// Service for editing a file kept behind a `FileStore`
pub struct EditFileService<S, E> {
    store: S,
    editor: E,
}

impl<S: FileStore, E: TextEditor> EditFileService<S, E> {
    /// Create a new edit service
    pub fn new(store: S, editor: E) -> Self {
        EditFileService { store, editor }
    }

    /// Read `path`, let the user edit it, and write it back if it changed.
    /// With `create`, a path that does not exist yet starts out empty.
    pub fn execute<A>(
        &self,
        path: &Path,
        format: EditFormat,
        create: bool,
        ack: &mut A,
    ) -> Result<EditOutcome>
    where
        A: Acknowledge + ?Sized,
    {
        let original = if create && !path.exists() {
            log::debug!("{} does not exist yet, starting empty", path.display());
            String::new()
        } else {
            self.store.read_file(path)?
        };

        let edited = match format {
            EditFormat::Text => {
                let edited = self.editor.edit_text(&original)?;
                if edited == original {
                    return Ok(EditOutcome::Unchanged);
                }
                edited
            }
            EditFormat::Json => {
                // Stored text that does not parse is opened as-is so it can be repaired
                let parsed_original = serde_json::from_str::<Value>(&original).ok();
                let buffer = match &parsed_original {
                    Some(value) => to_pretty_json(value)?,
                    None if original.trim().is_empty() => "{}".to_string(),
                    None => original.clone(),
                };

                let edited = EditState::<Value>::start(buffer).run(&self.editor, ack)?;
                if parsed_original.as_ref() == Some(&edited) {
                    return Ok(EditOutcome::Unchanged);
                }
                let mut text = to_pretty_json(&edited)?;
                text.push('\n');
                text
            }
        };

        self.store.write_file(path, &edited)?;
        Ok(EditOutcome::Written)
    }
}
