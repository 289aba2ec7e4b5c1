use std::fmt;

/// Operating system families a Node.js distribution may target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  MacOs,
  Windows,
  /// Any other host, carrying the raw `std::env::consts::OS` value
  Unknown(&'static str),
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Self {
    Self::from_identifier(std::env::consts::OS)
  }

  /// Map a `std::env::consts::OS` style identifier to an `Os`
  pub fn from_identifier(id: &'static str) -> Self {
    match id {
      "linux" => Self::Linux,
      "macos" => Self::MacOs,
      "windows" => Self::Windows,
      other => Self::Unknown(other),
    }
  }

  /// Returns the lowercase string identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Windows => "windows",
      Self::Unknown(id) => id,
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
