//! The `gulp` task.

use std::path::{Path, PathBuf};

use super::{Orchestrator, Task, TaskError, ensure_node};
use crate::config::{GulpOverrides, ProjectConfig};
use crate::consts::DEFAULT_GULP_TASK;
use crate::platform::paths::NodeLocation;
use crate::process::{Invocation, ProcessRunner};

/// Split a comma-separated task list, keeping order.
///
/// Surrounding whitespace is dropped; empty names are an error.
pub fn parse_tasks(list: &str) -> Result<Vec<String>, TaskError> {
  list
    .split(',')
    .map(|name| {
      let name = name.trim();
      if name.is_empty() {
        Err(TaskError::InvalidOption {
          option: "task",
          message: format!("empty task name in '{}'", list),
        })
      } else {
        Ok(name.to_string())
      }
    })
    .collect()
}

/// Runs one or more gulp tasks with the project's local gulp install.
#[derive(Debug, Clone)]
pub struct Gulp {
  pub location: NodeLocation,
  /// Comma-separated task names, as given.
  pub task: String,
  tasks: Vec<String>,
}

impl Gulp {
  pub fn gulp_js(&self) -> PathBuf {
    self.location.node_modules.join("gulp").join("bin").join("gulp.js")
  }
}

impl Task for Gulp {
  const NAME: &'static str = "gulp";

  type Overrides = GulpOverrides;

  fn configured(config: &ProjectConfig) -> &Self::Overrides {
    &config.gulp
  }

  fn initialize_options(base_dir: &Path) -> Self {
    Self {
      location: NodeLocation::defaults(base_dir),
      task: DEFAULT_GULP_TASK.to_string(),
      tasks: Vec::new(),
    }
  }

  fn apply_overrides(&mut self, overrides: Self::Overrides) {
    overrides.node.apply_to(&mut self.location);
    if let Some(task) = overrides.task {
      self.task = task;
    }
  }

  fn finalize_options(&mut self) -> Result<(), TaskError> {
    self.location.finalize();
    self.tasks = parse_tasks(&self.task)?;
    Ok(())
  }

  async fn run<R: ProcessRunner>(&mut self, orchestrator: &Orchestrator<R>) -> Result<(), TaskError> {
    let node = ensure_node(&mut self.location, orchestrator).await?;

    let invocation = Invocation::new(node)
      .arg(self.gulp_js())
      .args(&self.tasks)
      .current_dir(&self.location.base_dir);

    match orchestrator.execute(&invocation).await? {
      Some(0) => Ok(()),
      code => Err(TaskError::TaskFailed {
        tasks: self.task.clone(),
        code,
      }),
    }
  }
}
