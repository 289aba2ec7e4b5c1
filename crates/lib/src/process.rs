//! External process invocation.
//!
//! Tasks describe what to run as an [`Invocation`] and hand it to a
//! [`ProcessRunner`]. The system runner spawns the program with inherited
//! stdio and waits for it; tests substitute a runner that records instead.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::debug;

/// A single external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: PathBuf,
  pub args: Vec<OsString>,
  pub cwd: Option<PathBuf>,
}

impl Invocation {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: &Path) -> Self {
    self.cwd = Some(dir.to_path_buf());
    self
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program.display())?;
    for arg in &self.args {
      write!(f, " {}", arg.to_string_lossy())?;
    }
    Ok(())
  }
}

/// Runs invocations to completion, one at a time.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
  /// Run `invocation` and return its exit code (`None` when the process was
  /// terminated by a signal).
  async fn run(&self, invocation: &Invocation) -> io::Result<Option<i32>>;
}

/// Spawns real processes, inheriting stdin/stdout/stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
  async fn run(&self, invocation: &Invocation) -> io::Result<Option<i32>> {
    debug!(command = %invocation, cwd = ?invocation.cwd, "spawning process");

    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args);
    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }

    let status = command.status().await?;
    debug!(command = %invocation, code = ?status.code(), "process exited");
    Ok(status.code())
  }
}
