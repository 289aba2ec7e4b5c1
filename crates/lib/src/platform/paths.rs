//! Path resolution and probing for a locally installed Node.js runtime.
//!
//! Two install layouts are recognised:
//!
//! - flat (Windows archives): `<node_dir>/node.exe`, `<node_dir>/node_modules`
//! - POSIX: `<node_dir>/bin/node`, `<node_dir>/lib/node_modules`

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::consts::{DEFAULT_NODE_DIR, DEFAULT_NODE_MODULES_DIR};

/// Resolve `path` against `base_dir` into an absolute, symlink-free path.
///
/// The path does not have to exist. The deepest existing ancestor is
/// canonicalized and the remaining components are appended after lexical
/// normalization of `.` and `..`.
pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
  let joined = if path.is_absolute() {
    path.to_path_buf()
  } else {
    base_dir.join(path)
  };

  let components: Vec<Component<'_>> = joined.components().collect();
  for split in (1..=components.len()).rev() {
    let prefix: PathBuf = components[..split].iter().collect();
    if let Ok(resolved) = dunce::canonicalize(&prefix) {
      return append_normalized(resolved, &components[split..]);
    }
  }
  joined
}

fn append_normalized(mut resolved: PathBuf, tail: &[Component<'_>]) -> PathBuf {
  for component in tail {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        resolved.pop();
      }
      other => resolved.push(other),
    }
  }
  resolved
}

/// Look in `node_dir` for a node executable.
///
/// The flat `node.exe` layout is checked first, then `bin/node`.
pub fn resolve_binary(node_dir: &Path) -> Option<PathBuf> {
  let exe = node_dir.join("node.exe");
  let binary = node_dir.join("bin").join("node");
  if exe.is_file() {
    Some(exe)
  } else if binary.is_file() {
    Some(binary)
  } else {
    None
  }
}

/// Look in `node_dir` for the bundled library directory (where npm lives).
pub fn resolve_lib(node_dir: &Path) -> PathBuf {
  let lib = node_dir.join("lib").join("node_modules");
  if lib.is_dir() { lib } else { node_dir.join("node_modules") }
}

/// Where the runtime lives and where project dependencies go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLocation {
  pub base_dir: PathBuf,
  pub node_dir: PathBuf,
  /// `None` when no runtime is installed in `node_dir`.
  pub node: Option<PathBuf>,
  pub node_lib: PathBuf,
  pub node_modules: PathBuf,
}

impl NodeLocation {
  /// Default layout under `base_dir`, checked immediately.
  pub fn defaults(base_dir: &Path) -> Self {
    let node_dir = base_dir.join(DEFAULT_NODE_DIR);
    Self {
      base_dir: base_dir.to_path_buf(),
      node: resolve_binary(&node_dir),
      node_lib: resolve_lib(&node_dir),
      node_modules: base_dir.join(DEFAULT_NODE_MODULES_DIR),
      node_dir,
    }
  }

  /// Resolve the (possibly overridden) directories and check again.
  pub fn finalize(&mut self) {
    self.node_dir = resolve_path(&self.base_dir, &self.node_dir);
    self.node_modules = resolve_path(&self.base_dir, &self.node_modules);
    self.refresh();
  }

  /// Look in `node_dir` again, e.g. after an install.
  pub fn refresh(&mut self) {
    self.node = resolve_binary(&self.node_dir);
    self.node_lib = resolve_lib(&self.node_dir);
    debug!(node_dir = %self.node_dir.display(), node = ?self.node, "checked node installation");
  }

  pub fn node_exists(&self) -> bool {
    self.node.is_some()
  }
}
