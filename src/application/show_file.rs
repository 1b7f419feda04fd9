//! Show stored file use case

use crate::error::Result;
use crate::infrastructure::FileStore;
use std::path::Path;

/// Service for reading a file through the store
pub struct ShowFileService<S> {
    store: S,
}

impl<S: FileStore> ShowFileService<S> {
    pub fn new(store: S) -> Self {
        ShowFileService { store }
    }

    /// Return the decoded content of `path`
    pub fn execute(&self, path: &Path) -> Result<String> {
        self.store.read_file(path)
    }
}
