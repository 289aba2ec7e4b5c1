//! Selection of the Node.js distribution archive for a platform.

use thiserror::Error;

use crate::consts::PRODUCT;
use crate::extract::ArchiveFormat;
use crate::platform::Platform;
use crate::platform::arch::Arch;
use crate::platform::os::Os;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistError {
  /// No Node.js distribution is published for this OS / word width.
  #[error("{bits}-bit {os} is not supported")]
  UnsupportedPlatform { os: String, bits: u32 },
}

/// A distribution archive as published under the dist URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeArchive {
  pub filename: String,
  pub url: String,
  pub format: ArchiveFormat,
}

/// Compute the archive filename and download URL for `version` on `platform`.
///
/// `dist_url` is used as a prefix and is expected to end with `/`. Only
/// Windows (both widths) and 64-bit Linux have a known archive; anything
/// else is [`DistError::UnsupportedPlatform`].
pub fn select_archive(version: &str, dist_url: &str, platform: Platform) -> Result<NodeArchive, DistError> {
  let (os_tag, format) = match (platform.os, platform.arch) {
    (Os::Windows, _) => ("win", ArchiveFormat::Zip),
    (Os::Linux, Arch::X64) => ("linux", ArchiveFormat::TarXz),
    (os, arch) => {
      return Err(DistError::UnsupportedPlatform {
        os: os.to_string(),
        bits: arch.bits(),
      });
    }
  };

  let filename = format!(
    "{}-{}-{}-{}.{}",
    PRODUCT,
    version,
    os_tag,
    platform.arch,
    format.extension()
  );
  let url = format!("{}{}/{}", dist_url, version, filename);

  Ok(NodeArchive { filename, url, format })
}
