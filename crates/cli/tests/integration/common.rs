//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Log file the fake runtime appends its arguments to, relative to the project.
pub const CALLS_LOG: &str = "calls.log";

/// Shell script standing in for `node`.
///
/// Appends its arguments as one line to `calls.log` in the working directory
/// and exits with `$FAKE_NODE_EXIT` (default 0).
const FAKE_NODE: &str = r#"#!/bin/sh
echo "$@" >> calls.log
exit "${FAKE_NODE_EXIT:-0}"
"#;

/// Isolated project directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an empty project whose config points at an unreachable mirror,
  /// so nothing can be downloaded by accident.
  pub fn empty() -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_config("");
    env
  }

  /// Create a project with a fake runtime installed in `node/`.
  #[cfg(unix)]
  pub fn with_fake_node() -> Self {
    let env = Self::empty();
    env.install_fake_node("node");
    env
  }

  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  /// Write `nodekit.toml`, prefixed with an offline `[install-node]` section.
  pub fn write_config(&self, extra: &str) {
    let content = format!("[install-node]\nnode-dist-url = \"http://127.0.0.1:1/dist/\"\n\n{}", extra);
    self.write_file("nodekit.toml", &content);
  }

  /// Write a file relative to the project directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Install the fake runtime under `node_dir`, with the npm layout next to it.
  #[cfg(unix)]
  pub fn install_fake_node(&self, node_dir: &str) {
    use std::os::unix::fs::PermissionsExt;

    let node = Path::new(node_dir).join("bin").join("node");
    self.write_file(node.to_str().unwrap(), FAKE_NODE);
    let path = self.temp.path().join(&node);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

    let npm_cli = Path::new(node_dir).join("lib/node_modules/npm/bin/npm-cli.js");
    self.write_file(npm_cli.to_str().unwrap(), "");
  }

  /// Lines the fake runtime recorded, in call order.
  pub fn calls(&self) -> Vec<String> {
    match std::fs::read_to_string(self.temp.path().join(CALLS_LOG)) {
      Ok(content) => content.lines().map(str::to_string).collect(),
      Err(_) => Vec::new(),
    }
  }

  /// Get a Command for the nodekit binary, run against this project.
  pub fn nodekit_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("nodekit");
    cmd.arg("-C").arg(self.temp.path());
    cmd.env_remove("FAKE_NODE_EXIT");
    cmd
  }
}
