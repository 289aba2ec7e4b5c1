//! The `build` pipeline.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{Gulp, InstallNode, NpmInstall, Orchestrator, Task, TaskError};
use crate::config::{
  BuildOverrides, GulpOverrides, InstallNodeOverrides, NodeOverrides, NpmInstallOverrides, ProjectConfig,
};
use crate::process::{Invocation, ProcessRunner};

/// Provisions the runtime, installs dependencies, runs gulp and finally the
/// downstream build command, if any. The first failure stops the chain.
///
/// Only options that were set for the build are forwarded to the subtasks;
/// anything left unset comes from each subtask's own config section.
#[derive(Debug, Clone)]
pub struct Build {
  pub base_dir: PathBuf,
  /// Runtime directories as given, resolved by each subtask.
  pub node: NodeOverrides,
  pub use_ci: Option<bool>,
  pub task: Option<String>,
  /// Downstream command, program first. Empty means none.
  pub then: Vec<String>,
}

impl Task for Build {
  const NAME: &'static str = "build";

  type Overrides = BuildOverrides;

  fn configured(config: &ProjectConfig) -> &Self::Overrides {
    &config.build
  }

  fn initialize_options(base_dir: &Path) -> Self {
    Self {
      base_dir: base_dir.to_path_buf(),
      node: NodeOverrides::default(),
      use_ci: None,
      task: None,
      then: Vec::new(),
    }
  }

  fn apply_overrides(&mut self, overrides: Self::Overrides) {
    self.node = overrides.node;
    self.use_ci = overrides.use_ci.or(self.use_ci);
    self.task = overrides.task.or(self.task.take());
    if let Some(then) = overrides.then {
      self.then = then;
    }
  }

  fn finalize_options(&mut self) -> Result<(), TaskError> {
    if let Some(task) = &self.task {
      super::parse_tasks(task)?;
    }
    if self.then.first().is_some_and(|program| program.is_empty()) {
      return Err(TaskError::InvalidOption {
        option: "then",
        message: "program name must not be empty".to_string(),
      });
    }
    Ok(())
  }

  async fn run<R: ProcessRunner>(&mut self, orchestrator: &Orchestrator<R>) -> Result<(), TaskError> {
    orchestrator
      .invoke::<InstallNode>(InstallNodeOverrides {
        node: self.node.clone(),
        ..Default::default()
      })
      .await?;

    orchestrator
      .invoke::<NpmInstall>(NpmInstallOverrides {
        node: self.node.clone(),
        use_ci: self.use_ci,
      })
      .await?;

    orchestrator
      .invoke::<Gulp>(GulpOverrides {
        node: self.node.clone(),
        task: self.task.clone(),
      })
      .await?;

    let Some((program, args)) = self.then.split_first() else {
      return Ok(());
    };

    let invocation = Invocation::new(program)
      .args(args)
      .current_dir(&self.base_dir);
    info!(command = %invocation, "running downstream build");

    match orchestrator.execute(&invocation).await? {
      Some(0) => Ok(()),
      code => Err(TaskError::SubprocessFailed {
        command: invocation.to_string(),
        code,
      }),
    }
  }
}
