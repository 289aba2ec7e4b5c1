pub mod arch;
pub mod os;
pub mod paths;

use arch::Arch;
use os::Os;
use std::fmt;

/// Target environment a Node.js distribution is selected for (e.g., "linux-x64")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub os: Os,
  pub arch: Arch,
}

impl Platform {
  pub fn new(os: Os, arch: Arch) -> Self {
    Self { os, arch }
  }

  /// Detect the current platform at runtime
  ///
  /// Always succeeds; whether a distribution exists for the result is
  /// decided by [`crate::dist::select_archive`].
  pub fn current() -> Self {
    Self {
      os: Os::current(),
      arch: Arch::current(),
    }
  }

  /// Returns the platform tag (e.g., "linux-x64")
  pub fn tag(&self) -> String {
    format!("{}-{}", self.os, self.arch)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.tag())
  }
}
