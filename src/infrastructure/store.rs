//! File persistence through configurable external commands

use crate::domain::{CommandInvocation, Direction, StoreConfig};
use crate::error::{PipeditError, Result};
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Output, Stdio};
use std::thread;

/// Abstract file store used by the application layer
pub trait FileStore {
    /// Read the full content of `path`
    fn read_file(&self, path: &Path) -> Result<String>;

    /// Replace the content of `path`
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;
}

impl<T: FileStore + ?Sized> FileStore for &T {
    fn read_file(&self, path: &Path) -> Result<String> {
        (**self).read_file(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        (**self).write_file(path, content)
    }
}

/// Reads and writes files by piping through the configured commands.
///
/// Reading runs the read command on the path and returns its stdout.
/// Writing runs the write command on the path with the content on stdin.
/// In shell mode the path becomes part of a shell command line, so it must
/// never come from an untrusted source.
#[derive(Debug, Default)]
pub struct CommandFileStore {
    config: StoreConfig,
}

impl CommandFileStore {
    pub fn new(config: StoreConfig) -> Self {
        CommandFileStore { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn check_status(
        invocation: &CommandInvocation,
        output: &Output,
        diagnostics: &[u8],
    ) -> Result<()> {
        if output.status.success() {
            return Ok(());
        }
        Err(PipeditError::ExternalCommand {
            command: invocation.command_line(),
            status: output.status,
            output: String::from_utf8_lossy(diagnostics).into_owned(),
        })
    }
}

impl FileStore for CommandFileStore {
    fn read_file(&self, path: &Path) -> Result<String> {
        let invocation = self.config.invocation(Direction::Read, path)?;
        log::debug!("reading {} via {}", path.display(), invocation);

        let output = invocation
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|source| PipeditError::CommandSpawn {
                command: invocation.command_line(),
                source,
            })?;
        log::trace!("read command finished with {}", output.status);

        Self::check_status(&invocation, &output, &output.stderr)?;

        String::from_utf8(output.stdout).map_err(|source| PipeditError::InvalidUtf8Output {
            command: invocation.command_line(),
            source,
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        let invocation = self.config.invocation(Direction::Write, path)?;
        log::debug!("writing {} via {}", path.display(), invocation);

        let mut child = invocation
            .to_command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| PipeditError::CommandSpawn {
                command: invocation.command_line(),
                source,
            })?;

        // Feed stdin from its own thread so a child that writes before it
        // finishes reading cannot deadlock against us.
        let writer = child.stdin.take().map(|mut stdin| {
            let content = content.to_string();
            thread::spawn(move || stdin.write_all(content.as_bytes()))
        });

        let output = child
            .wait_with_output()
            .map_err(|source| PipeditError::CommandWait {
                command: invocation.command_line(),
                source,
            })?;
        log::trace!("write command finished with {}", output.status);

        let fed = writer
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")))
            })
            .unwrap_or(Ok(()));

        let mut combined = output.stdout.clone();
        combined.extend_from_slice(&output.stderr);
        Self::check_status(&invocation, &output, &combined)?;

        match fed {
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                log::debug!("write command exited before reading all input");
                Ok(())
            }
            Err(source) => Err(PipeditError::StdinWrite {
                command: invocation.command_line(),
                source,
            }),
            Ok(()) => Ok(()),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn passthrough_store() -> CommandFileStore {
        let config = StoreConfig::new();
        config.set_read_command("cat ");
        config.set_write_command("cat > ");
        CommandFileStore::new(config)
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("note.txt");
        let store = passthrough_store();

        let content = "first line\n\n  indented\ttab\nno trailing newline";
        store.write_file(&path, content).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
        assert_eq!(store.read_file(&path).unwrap(), content);
    }

    #[test]
    fn test_non_utf8_path_is_written_exactly() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join(OsStr::from_bytes(b"f\xFF.txt"));
        let store = passthrough_store();

        store.write_file(&path, "bytes kept").unwrap();

        assert!(path.exists());
        let names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![OsStr::from_bytes(b"f\xFF.txt").to_os_string()]);
        assert_eq!(store.read_file(&path).unwrap(), "bytes kept");
    }

    #[test]
    fn test_large_content_does_not_deadlock() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.txt");
        let config = StoreConfig::new();
        // Echoes everything back on stdout while also saving it
        config.set_write_command("tee");
        config.set_read_command("cat");
        let store = CommandFileStore::new(config);

        let content = "0123456789abcdef\n".repeat(64 * 1024);
        store.write_file(&path, &content).unwrap();

        assert_eq!(store.read_file(&path).unwrap(), content);
    }

    #[test]
    fn test_read_output_is_verbatim() {
        let config = StoreConfig::new();
        config.set_read_command("printf '  padded \\n\\n' #");
        let store = CommandFileStore::new(config);

        assert_eq!(store.read_file(Path::new("ignored")).unwrap(), "  padded \n\n");
    }

    #[test]
    fn test_read_uses_first_override_only() {
        let config = StoreConfig::new();
        config.set_read_command("echo X");
        config.set_read_command("echo Y");
        let store = CommandFileStore::new(config);

        assert_eq!(store.read_file(Path::new("target")).unwrap(), "X target\n");
    }

    #[test]
    fn test_read_failure_carries_stderr() {
        let temp = TempDir::new().unwrap();
        let store = passthrough_store();

        let result = store.read_file(&temp.path().join("missing.txt"));

        match result {
            Err(PipeditError::ExternalCommand { status, output, .. }) => {
                assert!(!status.success());
                assert!(output.contains("missing.txt"));
            }
            other => panic!("Expected ExternalCommand error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_failure_carries_combined_output() {
        let config = StoreConfig::new();
        config.set_write_command("echo to-stdout; echo to-stderr >&2; exit 3 #");
        let store = CommandFileStore::new(config);

        let err = store
            .write_file(Path::new("unused"), "content")
            .unwrap_err();

        match &err {
            PipeditError::ExternalCommand { status, output, .. } => {
                assert_eq!(status.code(), Some(3));
                assert!(output.contains("to-stdout"));
                assert!(output.contains("to-stderr"));
            }
            other => panic!("Expected ExternalCommand error, got {:?}", other),
        }
        let msg = err.to_string();
        assert!(msg.contains("to-stderr"));
        assert!(msg.contains("exit status: 3"));
    }

    #[test]
    fn test_writer_that_ignores_stdin_succeeds() {
        let config = StoreConfig::new();
        config.set_write_command("true");
        let store = CommandFileStore::new(config);

        let content = "x".repeat(1024 * 1024);
        assert!(store.write_file(Path::new("unused"), &content).is_ok());
    }

    #[test]
    fn test_invalid_utf8_output() {
        let config = StoreConfig::new();
        config.set_read_command("printf '\\377\\376' #");
        let store = CommandFileStore::new(config);

        let result = store.read_file(Path::new("x"));
        assert!(matches!(result, Err(PipeditError::InvalidUtf8Output { .. })));
    }

    #[test]
    fn test_argv_mode_does_not_expand_shell_syntax() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("$(echo injected).txt");
        std::fs::write(&path, "literal").unwrap();

        let config = StoreConfig::new().with_mode(crate::domain::CommandMode::Argv);
        config.set_read_command("cat");
        let store = CommandFileStore::new(config);

        assert_eq!(store.read_file(&path).unwrap(), "literal");
    }

    #[test]
    fn test_missing_program_in_argv_mode_is_spawn_error() {
        let config = StoreConfig::new().with_mode(crate::domain::CommandMode::Argv);
        config.set_read_command("/nonexistent/pipedit-reader");
        let store = CommandFileStore::new(config);

        let result = store.read_file(Path::new("x"));
        assert!(matches!(result, Err(PipeditError::CommandSpawn { .. })));
    }
}
