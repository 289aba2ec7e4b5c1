//! Task option overrides and the project configuration file.
//!
//! Every task starts from built-in defaults. Values from the `nodekit.toml`
//! section for that task are applied next, and explicit overrides (CLI flags
//! or values passed by a chaining task) win over both:
//!
//! ```toml
//! [install-node]
//! node-version = "v12.14.1"
//! cache-dir = ".cache/node"
//!
//! [npm-install]
//! use-ci = true
//!
//! [gulp]
//! task = "build,test"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::CONFIG_FILENAME;
use crate::platform::paths::NodeLocation;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid config '{path}': {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

/// Combine two sets of overrides, keeping values from `self` and filling
/// the gaps from `base`.
pub trait Overlay {
  fn overlay(self, base: Self) -> Self;
}

/// Options shared by every task that needs a Node.js runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeOverrides {
  pub node_dir: Option<PathBuf>,
  pub node_modules_dir: Option<PathBuf>,
}

impl NodeOverrides {
  /// Overrides pinning another task to the same directories as `location`.
  pub fn from_location(location: &NodeLocation) -> Self {
    Self {
      node_dir: Some(location.node_dir.clone()),
      node_modules_dir: Some(location.node_modules.clone()),
    }
  }

  pub fn apply_to(self, location: &mut NodeLocation) {
    if let Some(dir) = self.node_dir {
      location.node_dir = dir;
    }
    if let Some(dir) = self.node_modules_dir {
      location.node_modules = dir;
    }
  }
}

impl Overlay for NodeOverrides {
  fn overlay(self, base: Self) -> Self {
    Self {
      node_dir: self.node_dir.or(base.node_dir),
      node_modules_dir: self.node_modules_dir.or(base.node_modules_dir),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstallNodeOverrides {
  #[serde(flatten)]
  pub node: NodeOverrides,
  pub node_dist_url: Option<String>,
  pub node_version: Option<String>,
  pub cache_dir: Option<PathBuf>,
}

impl Overlay for InstallNodeOverrides {
  fn overlay(self, base: Self) -> Self {
    Self {
      node: self.node.overlay(base.node),
      node_dist_url: self.node_dist_url.or(base.node_dist_url),
      node_version: self.node_version.or(base.node_version),
      cache_dir: self.cache_dir.or(base.cache_dir),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NpmInstallOverrides {
  #[serde(flatten)]
  pub node: NodeOverrides,
  pub use_ci: Option<bool>,
}

impl Overlay for NpmInstallOverrides {
  fn overlay(self, base: Self) -> Self {
    Self {
      node: self.node.overlay(base.node),
      use_ci: self.use_ci.or(base.use_ci),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GulpOverrides {
  #[serde(flatten)]
  pub node: NodeOverrides,
  /// Comma-separated task names.
  pub task: Option<String>,
}

impl Overlay for GulpOverrides {
  fn overlay(self, base: Self) -> Self {
    Self {
      node: self.node.overlay(base.node),
      task: self.task.or(base.task),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildOverrides {
  #[serde(flatten)]
  pub node: NodeOverrides,
  pub use_ci: Option<bool>,
  pub task: Option<String>,
  /// Downstream build command run after gulp, program first.
  pub then: Option<Vec<String>>,
}

impl Overlay for BuildOverrides {
  fn overlay(self, base: Self) -> Self {
    Self {
      node: self.node.overlay(base.node),
      use_ci: self.use_ci.or(base.use_ci),
      task: self.task.or(base.task),
      then: self.then.or(base.then),
    }
  }
}

/// Contents of `nodekit.toml`, one optional section per task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ProjectConfig {
  pub install_node: InstallNodeOverrides,
  pub npm_install: NpmInstallOverrides,
  pub gulp: GulpOverrides,
  pub build: BuildOverrides,
}

impl ProjectConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), "loaded project config");
    Ok(config)
  }

  /// Load `nodekit.toml` from `base_dir` if it exists, defaults otherwise.
  pub fn discover(base_dir: &Path) -> Result<Self, ConfigError> {
    let path = base_dir.join(CONFIG_FILENAME);
    if path.is_file() {
      Self::load(&path)
    } else {
      Ok(Self::default())
    }
  }
}
