//! Edit, validate, acknowledge, repeat
//!
//! Structured editing serializes a value to pretty JSON, lets the user edit
//! it, and parses the result back. A parse failure is reported and the user
//! is sent back into the editor with their edited text, never the original.
//! Only a hard editor error (or a failed acknowledgment read) stops the loop
//! without a value.

use crate::error::{PipeditError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Something that lets a user edit text and hands back the result
pub trait TextEditor {
    fn edit_text(&self, content: &str) -> Result<String>;
}

impl<T: TextEditor + ?Sized> TextEditor for &T {
    fn edit_text(&self, content: &str) -> Result<String> {
        (**self).edit_text(content)
    }
}

/// Shows a parse diagnostic and blocks until the user is ready to retry
pub trait Acknowledge {
    fn acknowledge(&mut self, diagnostic: &str) -> Result<()>;
}

/// States of one structured edit
#[derive(Debug)]
pub enum EditState<T> {
    /// The editor is about to be opened on `buffer`
    Editing { buffer: String },
    /// The editor returned `edited`, which is about to be parsed
    Validating { edited: String },
    /// `edited` did not parse; waiting for the user before reopening it
    AwaitingAcknowledgment { edited: String, diagnostic: String },
    Done(T),
    Failed(PipeditError),
}

impl<T: DeserializeOwned> EditState<T> {
    pub fn start(buffer: String) -> Self {
        EditState::Editing { buffer }
    }

    /// Perform one transition. Terminal states are returned unchanged.
    pub fn step<E, A>(self, editor: &E, ack: &mut A) -> Self
    where
        E: TextEditor + ?Sized,
        A: Acknowledge + ?Sized,
    {
        match self {
            EditState::Editing { buffer } => match editor.edit_text(&buffer) {
                Ok(edited) => EditState::Validating { edited },
                Err(e) => EditState::Failed(e),
            },
            EditState::Validating { edited } => match serde_json::from_str::<T>(&edited) {
                Ok(value) => EditState::Done(value),
                Err(e) => {
                    let diagnostic = format!("failed to parse edited content: {}.", e);
                    log::debug!("edited content rejected: {}", diagnostic);
                    EditState::AwaitingAcknowledgment { edited, diagnostic }
                }
            },
            EditState::AwaitingAcknowledgment { edited, diagnostic } => {
                match ack.acknowledge(&diagnostic) {
                    Ok(()) => EditState::Editing { buffer: edited },
                    Err(e) => EditState::Failed(e),
                }
            }
            terminal => terminal,
        }
    }

    /// Step until a terminal state is reached
    pub fn run<E, A>(mut self, editor: &E, ack: &mut A) -> Result<T>
    where
        E: TextEditor + ?Sized,
        A: Acknowledge + ?Sized,
    {
        loop {
            self = match self {
                EditState::Done(value) => return Ok(value),
                EditState::Failed(e) => return Err(e),
                state => state.step(editor, ack),
            };
        }
    }
}

/// Serialize `value` as JSON indented by four spaces
pub fn to_pretty_json<S: Serialize + ?Sized>(value: &S) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(PipeditError::Serialize)?;
    String::from_utf8(buf).map_err(|e| {
        PipeditError::Serialize(<serde_json::Error as serde::ser::Error>::custom(e))
    })
}

/// Let the user edit `value` as JSON until it parses as `T`
pub fn edit_structured<S, T, E, A>(value: &S, editor: &E, ack: &mut A) -> Result<T>
where
    S: Serialize + ?Sized,
    T: DeserializeOwned,
    E: TextEditor + ?Sized,
    A: Acknowledge + ?Sized,
{
    let buffer = to_pretty_json(value)?;
    EditState::start(buffer).run(editor, ack)
}

/// Same as `edit_structured`, parsing back into `value` itself
pub fn edit_in_place<T, E, A>(value: &mut T, editor: &E, ack: &mut A) -> Result<()>
where
    T: Serialize + DeserializeOwned,
    E: TextEditor + ?Sized,
    A: Acknowledge + ?Sized,
{
    *value = edit_structured(&*value, editor, ack)?;
    Ok(())
}
