// SPDX-License-Identifier: CEPL-1.0
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Captured result of an external tool run. Text is decoded lossily.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// stdout followed by stderr, for diagnostics.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr);
        }
        text
    }
}

pub trait CommandRunner {
    /// Blocks until the program exits. Spawn failures are `Err`; a non-zero
    /// exit is reported through `CommandOutput::success`.
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<CommandOutput>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> io::Result<CommandOutput> {
        debug!("spawn {} {:?}", program.display(), args);
        let out = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            status: out.status.code(),
            success: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}
