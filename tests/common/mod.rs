#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn pipedit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pipedit").unwrap();
    cmd.env_remove("EDITOR");
    cmd.env_remove("FILE_READER_CMD");
    cmd.env_remove("FILE_WRITER_CMD");
    cmd.env_remove("PIPEDIT_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// `pipedit_cmd` with plain `cat` pass-through commands
pub fn plain_cmd() -> Command {
    let mut cmd = pipedit_cmd();
    cmd.env("FILE_READER_CMD", "cat");
    cmd.env("FILE_WRITER_CMD", "cat >");
    cmd
}

/// Write a `sh` script standing in for an editor and return the EDITOR value
pub fn fake_editor(dir: &Path, body: &str) -> String {
    let path = dir.join("fake-editor.sh");
    fs::write(&path, format!("{}\n", body)).unwrap();
    format!("sh '{}'", path.display())
}
