//! Implementation of the `nodekit install-node` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use nodekit_lib::config::InstallNodeOverrides;
use nodekit_lib::task::InstallNode;

use super::{NodeArgs, Session};

#[derive(Debug, Clone, Default, Args)]
pub struct InstallNodeArgs {
  #[command(flatten)]
  pub node: NodeArgs,

  /// Base URL of the Node.js distribution server (default: https://nodejs.org/dist/)
  #[arg(long, env = "NODEKIT_NODE_DIST_URL")]
  pub node_dist_url: Option<String>,

  /// Release to install, e.g. v12.14.1
  #[arg(long, env = "NODEKIT_NODE_VERSION")]
  pub node_version: Option<String>,

  /// Directory downloaded archives are kept in (default: cache)
  #[arg(long, env = "NODEKIT_CACHE_DIR")]
  pub cache_dir: Option<PathBuf>,
}

impl From<InstallNodeArgs> for InstallNodeOverrides {
  fn from(args: InstallNodeArgs) -> Self {
    Self {
      node: args.node.into(),
      node_dist_url: args.node_dist_url,
      node_version: args.node_version,
      cache_dir: args.cache_dir,
    }
  }
}

pub fn cmd_install_node(session: &Session, args: InstallNodeArgs) -> Result<()> {
  session.run::<InstallNode>(args.into())
}
