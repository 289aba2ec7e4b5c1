//! Implementation of the `nodekit build` command.
//!
//! Chains `install-node`, `npm-install` and `gulp`, then runs the command
//! given after `--` (or the `then` entry of the `[build]` config section):
//!
//! ```text
//! nodekit build --use-ci --task dist -- cargo build --release
//! ```

use anyhow::Result;
use clap::Args;

use nodekit_lib::config::BuildOverrides;
use nodekit_lib::task::Build;

use super::{NodeArgs, Session, flag};

#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
  #[command(flatten)]
  pub node: NodeArgs,

  /// Use `npm ci` instead of `npm install`
  #[arg(long, env = "NODEKIT_USE_CI")]
  pub use_ci: bool,

  /// Comma-separated gulp tasks to run (default: default)
  #[arg(long, env = "NODEKIT_GULP_TASK")]
  pub task: Option<String>,

  /// Downstream build command, run from the base directory after gulp
  #[arg(last = true, value_name = "DOWNSTREAM")]
  pub downstream: Vec<String>,
}

impl From<BuildArgs> for BuildOverrides {
  fn from(args: BuildArgs) -> Self {
    Self {
      node: args.node.into(),
      use_ci: flag(args.use_ci),
      task: args.task,
      then: (!args.downstream.is_empty()).then_some(args.downstream),
    }
  }
}

pub fn cmd_build(session: &Session, args: BuildArgs) -> Result<()> {
  session.run::<Build>(args.into())
}
