//! In-memory doubles for application tests

use crate::domain::{Acknowledge, TextEditor};
use crate::error::{PipeditError, Result};
use crate::infrastructure::FileStore;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct MemoryStore {
    files: RefCell<HashMap<PathBuf, String>>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn with_file(path: &str, content: &str) -> Self {
        let store = MemoryStore::default();
        store
            .files
            .borrow_mut()
            .insert(PathBuf::from(path), content.to_string());
        store
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files.borrow().get(Path::new(path)).cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl FileStore for MemoryStore {
    fn read_file(&self, path: &Path) -> Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| PipeditError::Io(std::io::Error::from(std::io::ErrorKind::NotFound)))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

pub struct ScriptedEditor {
    responses: RefCell<VecDeque<String>>,
    opened_with: RefCell<Vec<String>>,
}

impl ScriptedEditor {
    pub fn new(responses: &[&str]) -> Self {
        ScriptedEditor {
            responses: RefCell::new(responses.iter().map(|s| s.to_string()).collect()),
            opened_with: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.opened_with.borrow().clone()
    }
}

impl TextEditor for ScriptedEditor {
    fn edit_text(&self, content: &str) -> Result<String> {
        self.opened_with.borrow_mut().push(content.to_string());
        Ok(self
            .responses
            .borrow_mut()
            .pop_front()
            .expect("editor opened more times than scripted"))
    }
}

#[derive(Default)]
pub struct RecordingAck {
    pub diagnostics: Vec<String>,
}

impl Acknowledge for RecordingAck {
    fn acknowledge(&mut self, diagnostic: &str) -> Result<()> {
        self.diagnostics.push(diagnostic.to_string());
        Ok(())
    }
}
