//! Implementation of the `nodekit gulp` command.

use anyhow::Result;
use clap::Args;

use nodekit_lib::config::GulpOverrides;
use nodekit_lib::task::Gulp;

use super::{NodeArgs, Session};

#[derive(Debug, Clone, Default, Args)]
pub struct GulpArgs {
  #[command(flatten)]
  pub node: NodeArgs,

  /// Comma-separated gulp tasks to run (default: default)
  #[arg(long, env = "NODEKIT_GULP_TASK")]
  pub task: Option<String>,
}

impl From<GulpArgs> for GulpOverrides {
  fn from(args: GulpArgs) -> Self {
    Self {
      node: args.node.into(),
      task: args.task,
    }
  }
}

pub fn cmd_gulp(session: &Session, args: GulpArgs) -> Result<()> {
  session.run::<Gulp>(args.into())
}
