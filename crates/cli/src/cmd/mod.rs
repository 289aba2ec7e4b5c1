mod build;
mod gulp;
mod info;
mod install_node;
mod npm_install;

pub use build::{BuildArgs, cmd_build};
pub use gulp::{GulpArgs, cmd_gulp};
pub use info::cmd_info;
pub use install_node::{InstallNodeArgs, cmd_install_node};
pub use npm_install::{NpmInstallArgs, cmd_npm_install};

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use nodekit_lib::config::{NodeOverrides, ProjectConfig};
use nodekit_lib::task::{Orchestrator, Task};

use crate::output::{format_duration, print_success};

/// Runtime location flags shared by every subcommand that needs Node.js.
#[derive(Debug, Clone, Default, Args)]
pub struct NodeArgs {
  /// Directory holding the Node.js runtime (default: node)
  #[arg(long, env = "NODEKIT_NODE_DIR")]
  pub node_dir: Option<PathBuf>,

  /// Directory holding project dependencies (default: node_modules)
  #[arg(long, env = "NODEKIT_NODE_MODULES_DIR")]
  pub node_modules_dir: Option<PathBuf>,
}

impl From<NodeArgs> for NodeOverrides {
  fn from(args: NodeArgs) -> Self {
    Self {
      node_dir: args.node_dir,
      node_modules_dir: args.node_modules_dir,
    }
  }
}

/// A boolean flag that was not given leaves the choice to the config file.
pub fn flag(set: bool) -> Option<bool> {
  set.then_some(true)
}

/// Project directory and configuration every command works against.
#[derive(Debug)]
pub struct Session {
  pub base_dir: PathBuf,
  pub config: ProjectConfig,
}

impl Session {
  /// Resolve the base directory and load the project configuration.
  ///
  /// An explicit `config` path must exist and, when relative, is taken
  /// relative to the base directory. Otherwise `nodekit.toml` in the
  /// base directory is used when present.
  pub fn open(base_dir: Option<&Path>, config: Option<&Path>) -> Result<Self> {
    let base_dir = match base_dir {
      Some(dir) => dir.to_path_buf(),
      None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    let base_dir =
      dunce::canonicalize(&base_dir).with_context(|| format!("Base directory not found: {}", base_dir.display()))?;

    let config = match config {
      Some(path) => ProjectConfig::load(&base_dir.join(path))?,
      None => ProjectConfig::discover(&base_dir)?,
    };
    debug!(base_dir = %base_dir.display(), "session opened");

    Ok(Self { base_dir, config })
  }

  pub fn orchestrator(&self) -> Orchestrator {
    Orchestrator::new(&self.base_dir, self.config.clone())
  }

  /// Run task `T` to completion on a single-threaded runtime.
  pub fn run<T: Task>(&self, overrides: T::Overrides) -> Result<()> {
    let started = Instant::now();
    let orchestrator = self.orchestrator();

    let rt = tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .context("Failed to create async runtime")?;
    rt.block_on(orchestrator.invoke::<T>(overrides))
      .with_context(|| format!("{} failed", T::NAME))?;

    print_success(&format!("{} finished in {}", T::NAME, format_duration(started.elapsed())));
    Ok(())
  }
}
