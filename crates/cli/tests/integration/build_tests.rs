#![cfg(unix)]

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn build_runs_npm_gulp_and_downstream_in_order() {
  let env = TestEnv::with_fake_node();

  env
    .nodekit_cmd()
    .args(["build", "--task", "dist", "--", "sh", "-c", "echo downstream >> calls.log"])
    .assert()
    .success();

  let calls = env.calls();
  assert_eq!(calls.len(), 3);
  assert!(calls[0].ends_with("npm-cli.js install --scripts-prepend-node-path"));
  assert!(calls[1].ends_with("gulp.js dist"));
  assert_eq!(calls[2], "downstream");
}

#[test]
#[serial]
fn build_stops_at_first_failure() {
  let env = TestEnv::with_fake_node();

  env
    .nodekit_cmd()
    .args(["build", "--", "sh", "-c", "echo downstream >> calls.log"])
    .env("FAKE_NODE_EXIT", "1")
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to run npm install"));

  assert_eq!(env.calls().len(), 1);
}

#[test]
#[serial]
fn build_downstream_failure_is_reported() {
  let env = TestEnv::with_fake_node();

  env
    .nodekit_cmd()
    .args(["build", "--", "sh", "-c", "exit 7"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("exit code Some(7)"));
}

#[test]
#[serial]
fn build_downstream_from_config() {
  let env = TestEnv::with_fake_node();
  env.write_config("[build]\nthen = [\"sh\", \"-c\", \"echo from-config >> calls.log\"]\n");

  env.nodekit_cmd().arg("build").assert().success();

  assert_eq!(env.calls().last().map(String::as_str), Some("from-config"));
}
