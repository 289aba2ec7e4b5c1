use std::fmt;

/// CPU word width as Node.js names it in distribution archives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X64,
  X86,
}

impl Arch {
  /// Detect the word width of the running process
  pub fn current() -> Self {
    Self::from_bits(usize::BITS)
  }

  /// 64 maps to `x64`; every other width is treated as `x86`
  pub fn from_bits(bits: u32) -> Self {
    if bits == 64 { Self::X64 } else { Self::X86 }
  }

  pub fn bits(&self) -> u32 {
    match self {
      Self::X64 => 64,
      Self::X86 => 32,
    }
  }

  /// Returns the tag used in distribution filenames
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X64 => "x64",
      Self::X86 => "x86",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
