//! Application layer - Use cases and orchestration

pub mod edit_file;
pub mod show_file;
pub mod write_file;

#[cfg(test)]
pub(crate) mod test_support;

pub use edit_file::{EditFileService, EditFormat, EditOutcome};
pub use show_file::ShowFileService;
pub use write_file::WriteFileService;
