//! Info command implementation.
//!
//! Displays the detected platform, the archive `install-node` would fetch and
//! where the runtime is (or would be) located.

use anyhow::Result;
use serde::Serialize;

use nodekit_lib::dist::select_archive;
use nodekit_lib::task::{InstallNode, Task};

use super::Session;
use crate::output::{print_info, print_json, print_stat, print_warning};

#[derive(Debug, Serialize)]
struct InfoOutput {
  platform: String,
  node_version: String,
  archive: Option<ArchiveOutput>,
  unsupported: Option<String>,
  node_dir: String,
  node: Option<String>,
  node_lib: String,
  node_modules: String,
  cache_dir: String,
}

#[derive(Debug, Serialize)]
struct ArchiveOutput {
  filename: String,
  url: String,
}

pub fn cmd_info(session: &Session, json: bool) -> Result<()> {
  let mut task = InstallNode::initialize_options(&session.base_dir);
  task.apply_overrides(InstallNode::configured(&session.config).clone());
  task.finalize_options()?;

  let (archive, unsupported) = match select_archive(&task.node_version, &task.node_dist_url, task.platform) {
    Ok(archive) => (
      Some(ArchiveOutput {
        filename: archive.filename,
        url: archive.url,
      }),
      None,
    ),
    Err(err) => (None, Some(err.to_string())),
  };

  let location = &task.location;
  let info = InfoOutput {
    platform: task.platform.tag(),
    node_version: task.node_version.clone(),
    archive,
    unsupported,
    node_dir: location.node_dir.display().to_string(),
    node: location.node.as_ref().map(|p| p.display().to_string()),
    node_lib: location.node_lib.display().to_string(),
    node_modules: location.node_modules.display().to_string(),
    cache_dir: task.cache_dir.display().to_string(),
  };

  if json {
    return print_json(&info);
  }

  print_info(&format!("nodekit v{}", env!("CARGO_PKG_VERSION")));
  print_stat("Platform", &info.platform);
  print_stat("Version", &info.node_version);
  match (&info.archive, &info.unsupported) {
    (Some(archive), _) => {
      print_stat("Archive", &archive.filename);
      print_stat("URL", &archive.url);
    }
    (None, Some(reason)) => print_warning(reason),
    (None, None) => {}
  }
  print_stat("Node dir", &info.node_dir);
  print_stat("Node", info.node.as_deref().unwrap_or("not installed"));
  print_stat("Node lib", &info.node_lib);
  print_stat("Modules", &info.node_modules);
  print_stat("Cache", &info.cache_dir);

  Ok(())
}
