//! Implementation of the `nodekit npm-install` command.

use anyhow::Result;
use clap::Args;

use nodekit_lib::config::NpmInstallOverrides;
use nodekit_lib::task::NpmInstall;

use super::{NodeArgs, Session, flag};

#[derive(Debug, Clone, Default, Args)]
pub struct NpmInstallArgs {
  #[command(flatten)]
  pub node: NodeArgs,

  /// Use `npm ci` instead of `npm install`
  #[arg(long, env = "NODEKIT_USE_CI")]
  pub use_ci: bool,
}

impl From<NpmInstallArgs> for NpmInstallOverrides {
  fn from(args: NpmInstallArgs) -> Self {
    Self {
      node: args.node.into(),
      use_ci: flag(args.use_ci),
    }
  }
}

pub fn cmd_npm_install(session: &Session, args: NpmInstallArgs) -> Result<()> {
  session.run::<NpmInstall>(args.into())
}
