//! Scoped change of the process working directory.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Switches the working directory on creation and restores the previous one
/// when dropped, on every exit path including early returns and unwinding.
///
/// The working directory is process-wide state; callers that hold a guard
/// must not run concurrently with other code depending on it.
#[derive(Debug)]
pub struct WorkingDirGuard {
  original: PathBuf,
}

impl WorkingDirGuard {
  pub fn enter(dir: &Path) -> io::Result<Self> {
    let original = std::env::current_dir()?;
    std::env::set_current_dir(dir)?;
    debug!(from = %original.display(), to = %dir.display(), "changed working directory");
    Ok(Self { original })
  }

  pub fn original(&self) -> &Path {
    &self.original
  }
}

impl Drop for WorkingDirGuard {
  fn drop(&mut self) {
    if let Err(e) = std::env::set_current_dir(&self.original) {
      warn!(dir = %self.original.display(), error = %e, "failed to restore working directory");
    }
  }
}
