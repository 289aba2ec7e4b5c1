//! Test utilities for nodekit-lib.
//!
//! Builders for small zip and tar archives (including ones with hostile entry
//! names, which the regular archive writers refuse to produce) and a process
//! runner that records invocations instead of spawning them.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::process::{Invocation, ProcessRunner};

/// Entries are `(name, content)`; names ending in `/` become directories.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
  let file = File::create(path).unwrap();
  let mut zip = zip::ZipWriter::new(file);
  let options = zip::write::SimpleFileOptions::default();
  for (name, content) in entries {
    if name.ends_with('/') {
      zip.add_directory(*name, options).unwrap();
    } else {
      zip.start_file(*name, options).unwrap();
      zip.write_all(content.as_bytes()).unwrap();
    }
  }
  zip.finish().unwrap();
}

/// Same entry convention as [`write_zip`]. Names are written verbatim into
/// the header so traversal attempts can be expressed.
pub fn write_tar_xz(path: &Path, entries: &[(&str, &str)]) {
  let file = File::create(path).unwrap();
  let encoder = xz2::write::XzEncoder::new(file, 6);
  let mut builder = tar::Builder::new(encoder);
  for (name, content) in entries {
    let mut header = tar::Header::new_gnu();
    if name.ends_with('/') {
      header.set_entry_type(tar::EntryType::Directory);
      header.set_mode(0o755);
      header.set_size(0);
    } else {
      header.set_entry_type(tar::EntryType::Regular);
      header.set_mode(0o644);
      header.set_size(content.len() as u64);
    }
    let raw = name.as_bytes();
    header.as_old_mut().name[..raw.len()].copy_from_slice(raw);
    header.set_cksum();
    builder.append(&header, content.as_bytes()).unwrap();
  }
  builder.into_inner().unwrap().finish().unwrap();
}

/// Layout of an unpacked POSIX Node.js distribution.
pub fn fake_node_entries(top: &str) -> Vec<(String, String)> {
  vec![
    (format!("{top}/"), String::new()),
    (format!("{top}/bin/"), String::new()),
    (format!("{top}/bin/node"), "#!/bin/sh\n".to_string()),
    (format!("{top}/lib/node_modules/npm/bin/npm-cli.js"), "// npm\n".to_string()),
  ]
}

/// Write the 64-bit Linux archive for `version` as `dir/<archive name>` and
/// return its path.
pub fn write_linux_node_archive(dir: &Path, version: &str) -> PathBuf {
  let top = format!("node-{version}-linux-x64");
  let entries = fake_node_entries(&top);
  let refs: Vec<(&str, &str)> = entries.iter().map(|(n, c)| (n.as_str(), c.as_str())).collect();
  fs::create_dir_all(dir).unwrap();
  let path = dir.join(format!("{top}.tar.xz"));
  write_tar_xz(&path, &refs);
  path
}

/// Install a fake runtime (POSIX layout) so no provisioning is needed.
pub fn install_fake_node(node_dir: &Path) {
  fs::create_dir_all(node_dir.join("bin")).unwrap();
  fs::write(node_dir.join("bin").join("node"), "").unwrap();
  fs::create_dir_all(node_dir.join("lib").join("node_modules").join("npm").join("bin")).unwrap();
}

/// Records every invocation and answers with queued exit codes (0 once the
/// queue is empty).
#[derive(Debug, Default)]
pub struct RecordingRunner {
  pub invocations: RefCell<Vec<Invocation>>,
  exit_codes: RefCell<VecDeque<Option<i32>>>,
}

impl RecordingRunner {
  pub fn with_exit_codes(codes: impl IntoIterator<Item = Option<i32>>) -> Self {
    Self {
      invocations: RefCell::default(),
      exit_codes: RefCell::new(codes.into_iter().collect()),
    }
  }

  /// Arguments of each recorded invocation as strings.
  pub fn args(&self) -> Vec<Vec<String>> {
    self
      .invocations
      .borrow()
      .iter()
      .map(|inv| inv.args.iter().map(|a| a.to_string_lossy().into_owned()).collect())
      .collect()
  }
}

impl ProcessRunner for RecordingRunner {
  async fn run(&self, invocation: &Invocation) -> io::Result<Option<i32>> {
    self.invocations.borrow_mut().push(invocation.clone());
    Ok(self.exit_codes.borrow_mut().pop_front().unwrap_or(Some(0)))
  }
}
