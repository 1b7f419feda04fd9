//! pipedit - Edit files kept behind external commands
//!
//! Two independent pieces: an interactive edit loop that sends text or JSON
//! through the user's editor (retrying JSON until it parses), and a file
//! store that reads and writes through configurable shell commands, by
//! default gpg, so encryption at rest stays pluggable.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::PipeditError;
