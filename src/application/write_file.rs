//! Write stored file use case

use crate::error::Result;
use crate::infrastructure::FileStore;
use std::path::Path;

/// Service for replacing a file's content through the store
pub struct WriteFileService<S> {
    store: S,
}

impl<S: FileStore> WriteFileService<S> {
    pub fn new(store: S) -> Self {
        WriteFileService { store }
    }

    pub fn execute(&self, path: &Path, content: &str) -> Result<()> {
        self.store.write_file(path, content)
    }
}
