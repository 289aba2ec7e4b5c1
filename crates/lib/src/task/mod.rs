//! Build tasks and the orchestrator that chains them.
//!
//! A task goes through three phases before it runs:
//!
//! 1. `initialize_options` fills every option with its default
//! 2. `apply_overrides` assigns explicitly provided values
//! 3. `finalize_options` resolves paths, detects the runtime and validates
//!
//! [`Orchestrator::invoke`] drives those phases and then runs the task. Tasks
//! use the same call to run other tasks, so a failure anywhere in a chain
//! surfaces unchanged from the outermost `invoke`.

mod build;
mod gulp;
mod install_node;
mod npm;

pub use build::Build;
pub use gulp::{Gulp, parse_tasks};
pub use install_node::InstallNode;
pub use npm::NpmInstall;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, InstallNodeOverrides, NodeOverrides, Overlay, ProjectConfig};
use crate::dist::DistError;
use crate::extract::ExtractError;
use crate::fetch::FetchError;
use crate::platform::paths::NodeLocation;
use crate::process::{Invocation, ProcessRunner, SystemRunner};

#[derive(Debug, Error)]
pub enum TaskError {
  #[error(transparent)]
  Platform(#[from] DistError),

  #[error(transparent)]
  Fetch(#[from] FetchError),

  #[error(transparent)]
  Extract(#[from] ExtractError),

  #[error(transparent)]
  Config(#[from] ConfigError),

  /// npm exited unsuccessfully.
  #[error("failed to run npm install (exit code {code:?}): {command}")]
  InstallFailed { command: String, code: Option<i32> },

  /// gulp exited unsuccessfully.
  #[error("failed to run gulp {tasks} (exit code {code:?})")]
  TaskFailed { tasks: String, code: Option<i32> },

  /// A downstream build command exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {command}")]
  SubprocessFailed { command: String, code: Option<i32> },

  #[error("failed to start '{command}': {source}")]
  Spawn {
    command: String,
    #[source]
    source: io::Error,
  },

  #[error("no node executable found in {0}")]
  NodeNotFound(PathBuf),

  #[error("invalid value for {option}: {message}")]
  InvalidOption { option: &'static str, message: String },
}

/// A unit of work the orchestrator can configure and run.
#[allow(async_fn_in_trait)]
pub trait Task: Sized {
  /// Command name, as used for the CLI subcommand and config section.
  const NAME: &'static str;

  type Overrides: Overlay + Clone + Default;

  /// This task's section of the project configuration.
  fn configured(config: &ProjectConfig) -> &Self::Overrides;

  fn initialize_options(base_dir: &Path) -> Self;

  fn apply_overrides(&mut self, overrides: Self::Overrides);

  fn finalize_options(&mut self) -> Result<(), TaskError>;

  async fn run<R: ProcessRunner>(&mut self, orchestrator: &Orchestrator<R>) -> Result<(), TaskError>;
}

/// Shared build context: every task invoked through it sees the same base
/// directory, project configuration, HTTP client and process runner.
#[derive(Debug)]
pub struct Orchestrator<R = SystemRunner> {
  base_dir: PathBuf,
  config: ProjectConfig,
  client: reqwest::Client,
  runner: R,
}

impl Orchestrator<SystemRunner> {
  pub fn new(base_dir: impl Into<PathBuf>, config: ProjectConfig) -> Self {
    Self::with_runner(base_dir, config, SystemRunner)
  }
}

impl<R> Orchestrator<R> {
  pub fn with_runner(base_dir: impl Into<PathBuf>, config: ProjectConfig, runner: R) -> Self {
    Self {
      base_dir: base_dir.into(),
      config,
      client: reqwest::Client::new(),
      runner,
    }
  }

  pub fn base_dir(&self) -> &Path {
    &self.base_dir
  }

  pub fn config(&self) -> &ProjectConfig {
    &self.config
  }

  pub fn client(&self) -> &reqwest::Client {
    &self.client
  }

  pub fn runner(&self) -> &R {
    &self.runner
  }
}

impl<R: ProcessRunner> Orchestrator<R> {
  /// Configure a fresh `T` and run it to completion.
  ///
  /// `overrides` take precedence over the project configuration section for
  /// `T`, which takes precedence over the task's defaults.
  pub async fn invoke<T: Task>(&self, overrides: T::Overrides) -> Result<(), TaskError> {
    let mut task = T::initialize_options(&self.base_dir);
    task.apply_overrides(overrides.overlay(T::configured(&self.config).clone()));
    task.finalize_options()?;

    info!(task = T::NAME, "running task");
    task.run(self).await
  }

  /// Run an external command and return its exit code.
  pub async fn execute(&self, invocation: &Invocation) -> Result<Option<i32>, TaskError> {
    self.runner.run(invocation).await.map_err(|source| TaskError::Spawn {
      command: invocation.to_string(),
      source,
    })
  }
}

/// Make sure `location` has a runtime, provisioning one into its directories
/// if needed, and return the executable.
pub(crate) async fn ensure_node<R: ProcessRunner>(
  location: &mut NodeLocation,
  orchestrator: &Orchestrator<R>,
) -> Result<PathBuf, TaskError> {
  if !location.node_exists() {
    let overrides = InstallNodeOverrides {
      node: NodeOverrides::from_location(location),
      ..Default::default()
    };
    orchestrator.invoke::<InstallNode>(overrides).await?;
    location.refresh();
  }

  location
    .node
    .clone()
    .ok_or_else(|| TaskError::NodeNotFound(location.node_dir.clone()))
}
