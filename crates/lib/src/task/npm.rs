//! The `npm-install` task.

use std::path::{Path, PathBuf};

use super::{Orchestrator, Task, TaskError, ensure_node};
use crate::config::{NpmInstallOverrides, ProjectConfig};
use crate::consts::SCRIPTS_PREPEND_NODE_PATH;
use crate::platform::paths::NodeLocation;
use crate::process::{Invocation, ProcessRunner};

/// Installs project dependencies with the npm bundled in the managed runtime,
/// provisioning the runtime first when it is missing.
///
/// `npm install` is used by default; `use_ci` switches to `npm ci`.
#[derive(Debug, Clone)]
pub struct NpmInstall {
  pub location: NodeLocation,
  pub use_ci: bool,
}

impl NpmInstall {
  pub fn npm_cli(&self) -> PathBuf {
    self.location.node_lib.join("npm").join("bin").join("npm-cli.js")
  }

  fn mode(&self) -> &'static str {
    if self.use_ci { "ci" } else { "install" }
  }
}

impl Task for NpmInstall {
  const NAME: &'static str = "npm-install";

  type Overrides = NpmInstallOverrides;

  fn configured(config: &ProjectConfig) -> &Self::Overrides {
    &config.npm_install
  }

  fn initialize_options(base_dir: &Path) -> Self {
    Self {
      location: NodeLocation::defaults(base_dir),
      use_ci: false,
    }
  }

  fn apply_overrides(&mut self, overrides: Self::Overrides) {
    overrides.node.apply_to(&mut self.location);
    if let Some(use_ci) = overrides.use_ci {
      self.use_ci = use_ci;
    }
  }

  fn finalize_options(&mut self) -> Result<(), TaskError> {
    self.location.finalize();
    Ok(())
  }

  async fn run<R: ProcessRunner>(&mut self, orchestrator: &Orchestrator<R>) -> Result<(), TaskError> {
    let node = ensure_node(&mut self.location, orchestrator).await?;

    let invocation = Invocation::new(node)
      .arg(self.npm_cli())
      .arg(self.mode())
      .arg(SCRIPTS_PREPEND_NODE_PATH)
      .current_dir(&self.location.base_dir);

    match orchestrator.execute(&invocation).await? {
      Some(0) => Ok(()),
      code => Err(TaskError::InstallFailed {
        command: invocation.to_string(),
        code,
      }),
    }
  }
}
