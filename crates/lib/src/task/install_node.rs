//! The `install-node` task: provision a local copy of Node.js.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{Orchestrator, Task, TaskError};
use crate::config::{InstallNodeOverrides, ProjectConfig};
use crate::consts::{DEFAULT_CACHE_DIR, DEFAULT_DIST_URL, DEFAULT_NODE_VERSION};
use crate::dist::select_archive;
use crate::extract::install_from_archive;
use crate::fetch::CacheFetcher;
use crate::platform::Platform;
use crate::platform::paths::{NodeLocation, resolve_path};
use crate::process::ProcessRunner;

/// Downloads (or reuses from cache) the distribution archive for the host and
/// unpacks it into the node directory, unless a runtime is already there.
#[derive(Debug, Clone)]
pub struct InstallNode {
  pub location: NodeLocation,
  pub node_dist_url: String,
  pub node_version: String,
  pub cache_dir: PathBuf,
  /// Target the archive is selected for; the host by default.
  pub platform: Platform,
}

impl Task for InstallNode {
  const NAME: &'static str = "install-node";

  type Overrides = InstallNodeOverrides;

  fn configured(config: &ProjectConfig) -> &Self::Overrides {
    &config.install_node
  }

  fn initialize_options(base_dir: &Path) -> Self {
    Self {
      location: NodeLocation::defaults(base_dir),
      node_dist_url: DEFAULT_DIST_URL.to_string(),
      node_version: DEFAULT_NODE_VERSION.to_string(),
      cache_dir: base_dir.join(DEFAULT_CACHE_DIR),
      platform: Platform::current(),
    }
  }

  fn apply_overrides(&mut self, overrides: Self::Overrides) {
    overrides.node.apply_to(&mut self.location);
    if let Some(url) = overrides.node_dist_url {
      self.node_dist_url = url;
    }
    if let Some(version) = overrides.node_version {
      self.node_version = version;
    }
    if let Some(dir) = overrides.cache_dir {
      self.cache_dir = dir;
    }
  }

  fn finalize_options(&mut self) -> Result<(), TaskError> {
    self.location.finalize();
    self.cache_dir = resolve_path(&self.location.base_dir, &self.cache_dir);

    if self.node_version.is_empty() || self.node_version.contains('/') {
      return Err(TaskError::InvalidOption {
        option: "node-version",
        message: format!("'{}' is not a release name", self.node_version),
      });
    }
    if self.node_dist_url.is_empty() {
      return Err(TaskError::InvalidOption {
        option: "node-dist-url",
        message: "must not be empty".to_string(),
      });
    }
    if !self.node_dist_url.ends_with('/') {
      self.node_dist_url.push('/');
    }
    Ok(())
  }

  async fn run<R: ProcessRunner>(&mut self, orchestrator: &Orchestrator<R>) -> Result<(), TaskError> {
    if self.location.node_exists() {
      info!(node_dir = %self.location.node_dir.display(), "using existing Node installation");
      return Ok(());
    }

    info!(version = %self.node_version, platform = %self.platform, "installing Node");
    let archive = select_archive(&self.node_version, &self.node_dist_url, self.platform)?;

    let fetcher = CacheFetcher::new(&self.cache_dir, orchestrator.client().clone());
    let archive_path = fetcher.ensure_cached(&archive.url, &archive.filename).await?;

    install_from_archive(&archive_path, &self.location.node_dir)?;
    self.location.refresh();
    Ok(())
  }
}
