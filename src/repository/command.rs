//! External process execution for the repository adapter.
//!
//! Every backend operation is a single blocking invocation of an external
//! program in the repository root. Programs are spawned directly, never
//! through a shell, so paths containing spaces or shell metacharacters reach
//! the backend untouched. File name arguments are placed after `--` by the
//! command builders in [`Backend`](super::Backend) so a leading `-` is not
//! read as an option.

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::error::{Error, Result};

/// A program together with its arguments and environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
    pub env: Vec<(&'static str, &'static str)>,
}

impl Invocation {
    pub fn new<I, S>(program: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }

    /// Appends further arguments, typically file names.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_env(mut self, key: &'static str, value: &'static str) -> Self {
        self.env.push((key, value));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit code and captured output of a finished process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs `invocation` in `cwd` and waits for it to exit.
///
/// When `stdin` is given the process reads from that file, otherwise stdin
/// is closed. A nonzero exit status is not an error at this level.
pub fn run(cwd: &Path, invocation: &Invocation, stdin: Option<File>) -> Result<CommandOutput> {
    debug!("Running `{}` in {}", invocation, cwd.display());

    let mut command = Command::new(invocation.program);
    command
        .args(&invocation.args)
        .current_dir(cwd)
        .stdin(stdin.map_or_else(Stdio::null, Stdio::from));
    for (key, value) in &invocation.env {
        command.env(key, value);
    }

    let output = command.output().map_err(|source| Error::CommandSpawn {
        program: invocation.program.to_string(),
        source,
    })?;

    let output = CommandOutput {
        code: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
    };
    debug!("`{}` exited with {:?}", invocation, output.code);
    Ok(output)
}

/// Runs `invocation` and turns a nonzero exit status into an error.
pub fn run_checked(cwd: &Path, invocation: &Invocation) -> Result<CommandOutput> {
    let output = run(cwd, invocation, None)?;
    if output.success() {
        Ok(output)
    } else {
        Err(Error::BackendCommand {
            command: invocation.to_string(),
            code: output.code,
            stderr: output.stderr_lossy(),
        })
    }
}

/// Runs `invocation`, logging rather than reporting a nonzero exit status.
///
/// Used for the add/remove family, whose failures are best effort.
pub fn run_logged(cwd: &Path, invocation: &Invocation) -> Result<()> {
    let output = run(cwd, invocation, None)?;
    if !output.success() {
        warn!(
            "`{}` exited with {:?}: {}",
            invocation,
            output.code,
            output.stderr_lossy().trim()
        );
    }
    Ok(())
}
