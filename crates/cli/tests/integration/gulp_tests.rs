#![cfg(unix)]

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn gulp_runs_default_task() {
  let env = TestEnv::with_fake_node();

  env.nodekit_cmd().arg("gulp").assert().success();

  let calls = env.calls();
  assert_eq!(calls.len(), 1);
  let gulp_js = env.root().join("node_modules/gulp/bin/gulp.js");
  assert_eq!(calls[0], format!("{} default", gulp_js.display()));
}

#[test]
#[serial]
fn gulp_passes_task_list_in_order() {
  let env = TestEnv::with_fake_node();

  env.nodekit_cmd().args(["gulp", "--task", "build,test"]).assert().success();

  assert!(env.calls()[0].ends_with("gulp.js build test"));
}

#[test]
#[serial]
fn gulp_failure_is_reported() {
  let env = TestEnv::with_fake_node();

  env
    .nodekit_cmd()
    .args(["gulp", "--task", "lint"])
    .env("FAKE_NODE_EXIT", "2")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to run gulp lint"));
}

#[test]
#[serial]
fn npm_install_uses_bundled_npm() {
  let env = TestEnv::with_fake_node();

  env.nodekit_cmd().arg("npm-install").assert().success();

  let npm_cli = env.root().join("node/lib/node_modules/npm/bin/npm-cli.js");
  assert_eq!(
    env.calls(),
    [format!("{} install --scripts-prepend-node-path", npm_cli.display())]
  );
}

#[test]
#[serial]
fn npm_install_ci_from_flag_and_env() {
  let env = TestEnv::with_fake_node();

  env.nodekit_cmd().args(["npm-install", "--use-ci"]).assert().success();
  env
    .nodekit_cmd()
    .arg("npm-install")
    .env("NODEKIT_USE_CI", "true")
    .assert()
    .success();

  let calls = env.calls();
  assert_eq!(calls.len(), 2);
  assert!(calls.iter().all(|line| line.ends_with("npm-cli.js ci --scripts-prepend-node-path")));
}

#[test]
#[serial]
fn install_node_skips_existing_runtime() {
  let env = TestEnv::with_fake_node();

  env.nodekit_cmd().arg("install-node").assert().success();

  assert!(!env.temp.path().join("cache").exists());
  assert!(env.calls().is_empty());
}

#[test]
#[serial]
fn custom_node_dir_flag() {
  let env = TestEnv::empty();
  env.install_fake_node("tools/node");

  env
    .nodekit_cmd()
    .args(["gulp", "--node-dir", "tools/node"])
    .assert()
    .success();

  assert_eq!(env.calls().len(), 1);
}
