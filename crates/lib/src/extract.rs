//! Safe installation of a distribution archive.
//!
//! Archives are expected to wrap everything in a single top-level directory
//! (`node-v12.14.1-linux-x64/...`). Every entry name is validated before a
//! single byte is written; the wrapper directory is then renamed into place.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::{debug, info};
use xz2::read::XzDecoder;
use zip::ZipArchive;

use crate::util::cwd::WorkingDirGuard;

#[derive(Debug, Error)]
pub enum ExtractError {
  #[error("unsupported archive format: {0}")]
  UnsupportedFormat(PathBuf),

  /// One or more entries would escape the extraction directory.
  #[error("{archive} appears to be malicious, bad filenames: {entries:?}")]
  Malicious { archive: PathBuf, entries: Vec<String> },

  /// No entry lives under a top-level directory.
  #[error("{0} has no top-level directory")]
  Malformed(PathBuf),

  #[error("failed to open archive '{path}': {source}")]
  Open {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read archive '{path}': {message}")]
  Read { path: PathBuf, message: String },

  #[error("failed to extract '{path}': {message}")]
  Unpack { path: PathBuf, message: String },

  #[error("failed to move '{from}' to '{to}': {source}")]
  Rename {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to enter '{path}': {source}")]
  WorkingDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("install destination has no directory name: {0}")]
  InvalidDestination(PathBuf),

  #[error("failed to create '{path}': {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Archive container formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
  Zip,
  TarXz,
  TarGz,
  Tar,
}

impl ArchiveFormat {
  pub fn from_path(path: &Path) -> Option<Self> {
    let name = path.file_name()?.to_str()?;
    if name.ends_with(".zip") {
      Some(Self::Zip)
    } else if name.ends_with(".tar.xz") || name.ends_with(".txz") {
      Some(Self::TarXz)
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
      Some(Self::TarGz)
    } else if name.ends_with(".tar") {
      Some(Self::Tar)
    } else {
      None
    }
  }

  pub fn extension(&self) -> &'static str {
    match self {
      Self::Zip => "zip",
      Self::TarXz => "tar.xz",
      Self::TarGz => "tar.gz",
      Self::Tar => "tar",
    }
  }
}

/// An opened archive with a uniform list / extract interface.
///
/// Tar streams can only be walked once, so the tar variant reopens the file
/// for each pass.
pub enum ArchiveHandle {
  Zip {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
  },
  Tar {
    path: PathBuf,
    format: ArchiveFormat,
  },
}

impl ArchiveHandle {
  pub fn open(path: &Path) -> Result<Self, ExtractError> {
    let format = ArchiveFormat::from_path(path).ok_or_else(|| ExtractError::UnsupportedFormat(path.to_path_buf()))?;
    match format {
      ArchiveFormat::Zip => {
        let file = open_file(path)?;
        let archive = ZipArchive::new(BufReader::new(file)).map_err(|e| ExtractError::Read {
          path: path.to_path_buf(),
          message: e.to_string(),
        })?;
        Ok(Self::Zip {
          path: path.to_path_buf(),
          archive,
        })
      }
      _ => {
        // Fail early on a missing file rather than on the first pass.
        open_file(path)?;
        Ok(Self::Tar {
          path: path.to_path_buf(),
          format,
        })
      }
    }
  }

  /// Entry names in archive order.
  pub fn entry_names(&mut self) -> Result<Vec<String>, ExtractError> {
    match self {
      Self::Zip { path, archive } => {
        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
          let entry = archive.by_index_raw(i).map_err(|e| read_error(path, e))?;
          names.push(entry.name().to_string());
        }
        Ok(names)
      }
      Self::Tar { path, format } => {
        let mut archive = open_tar(path, *format)?;
        let mut names = Vec::new();
        for entry in archive.entries().map_err(|e| read_error(path, e))? {
          let entry = entry.map_err(|e| read_error(path, e))?;
          names.push(String::from_utf8_lossy(&entry.path_bytes()).into_owned());
        }
        Ok(names)
      }
    }
  }

  /// Unpack every entry below `dir`, preserving permissions.
  pub fn extract_all(&mut self, dir: &Path) -> Result<(), ExtractError> {
    match self {
      Self::Zip { path, archive } => archive.extract(dir).map_err(|e| unpack_error(path, e)),
      Self::Tar { path, format } => {
        let mut archive = open_tar(path, *format)?;
        archive.set_preserve_permissions(true);
        archive.unpack(dir).map_err(|e| unpack_error(path, e))
      }
    }
  }
}

fn open_file(path: &Path) -> Result<File, ExtractError> {
  File::open(path).map_err(|source| ExtractError::Open {
    path: path.to_path_buf(),
    source,
  })
}

fn open_tar(path: &Path, format: ArchiveFormat) -> Result<tar::Archive<Box<dyn Read>>, ExtractError> {
  let file = BufReader::new(open_file(path)?);
  let reader: Box<dyn Read> = match format {
    ArchiveFormat::TarXz => Box::new(XzDecoder::new(file)),
    ArchiveFormat::TarGz => Box::new(GzDecoder::new(file)),
    _ => Box::new(file),
  };
  Ok(tar::Archive::new(reader))
}

fn read_error(path: &Path, e: impl ToString) -> ExtractError {
  ExtractError::Read {
    path: path.to_path_buf(),
    message: e.to_string(),
  }
}

fn unpack_error(path: &Path, e: impl ToString) -> ExtractError {
  ExtractError::Unpack {
    path: path.to_path_buf(),
    message: e.to_string(),
  }
}

/// Name of the wrapper directory: the first segment of the first entry that
/// contains a `/`.
pub fn top_level_dir(names: &[String]) -> Option<&str> {
  names.iter().find_map(|name| name.split_once('/').map(|(top, _)| top))
}

/// True for absolute names (`/x`, `\x`, `C:x`) and names with a `..` segment.
pub fn is_unsafe_entry(name: &str) -> bool {
  if name.starts_with('/') || name.starts_with('\\') {
    return true;
  }
  let bytes = name.as_bytes();
  if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
    return true;
  }
  name.split(['/', '\\']).any(|segment| segment == "..")
}

/// Install the archive at `archive_path` as the directory `dest_dir`.
///
/// Entries are unpacked next to `dest_dir` (into its parent) and the
/// archive's wrapper directory is then renamed to `dest_dir`. Validation of
/// all entry names happens first: a hostile archive writes nothing.
pub fn install_from_archive(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
  let dest_name = dest_dir
    .file_name()
    .ok_or_else(|| ExtractError::InvalidDestination(dest_dir.to_path_buf()))?;
  let extract_base = match dest_dir.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent,
    _ => Path::new("."),
  };

  let mut archive = ArchiveHandle::open(archive_path)?;
  let names = archive.entry_names()?;
  debug!(archive = %archive_path.display(), entries = names.len(), "listed archive");

  let install_dir = top_level_dir(&names)
    .ok_or_else(|| ExtractError::Malformed(archive_path.to_path_buf()))?
    .to_string();

  let bad_entries: Vec<String> = names.iter().filter(|name| is_unsafe_entry(name)).cloned().collect();
  if !bad_entries.is_empty() {
    return Err(ExtractError::Malicious {
      archive: archive_path.to_path_buf(),
      entries: bad_entries,
    });
  }

  fs::create_dir_all(extract_base).map_err(|source| ExtractError::CreateDir {
    path: extract_base.to_path_buf(),
    source,
  })?;
  archive.extract_all(extract_base)?;

  let _cwd = WorkingDirGuard::enter(extract_base).map_err(|source| ExtractError::WorkingDir {
    path: extract_base.to_path_buf(),
    source,
  })?;
  fs::rename(&install_dir, dest_name).map_err(|source| ExtractError::Rename {
    from: extract_base.join(&install_dir),
    to: dest_dir.to_path_buf(),
    source,
  })?;

  info!(archive = %archive_path.display(), dest = %dest_dir.display(), "installed archive");
  Ok(())
}
