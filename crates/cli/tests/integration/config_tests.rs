use predicates::prelude::*;
#[cfg(unix)]
use serial_test::serial;

use super::common::TestEnv;

#[test]
fn explicit_config_must_exist() {
  let env = TestEnv::empty();

  env
    .nodekit_cmd()
    .args(["--config", "missing.toml", "info"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn invalid_config_is_rejected() {
  let env = TestEnv::empty();
  env.write_config("[npm-install]\nuse-ci = \"sometimes\"\n");

  env
    .nodekit_cmd()
    .arg("info")
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn alternate_config_file_is_used() {
  let env = TestEnv::empty();
  env.write_file("ci.toml", "[install-node]\nnode-version = \"v16.20.2\"\n");

  env
    .nodekit_cmd()
    .args(["--config", "ci.toml", "info", "--json"])
    .assert()
    .success()
    .stdout(predicate::str::contains("v16.20.2"));
}

#[test]
fn flags_win_over_env_and_config() {
  let env = TestEnv::empty();
  env.write_config("[gulp]\ntask = \"from-config\"\n");

  env
    .nodekit_cmd()
    .args(["gulp", "--task", "a,,b"])
    .env("NODEKIT_GULP_TASK", "from-env")
    .assert()
    .failure()
    .stderr(predicate::str::contains("'a,,b'"));
}

#[cfg(unix)]
#[test]
#[serial]
fn config_section_sets_gulp_task() {
  let env = TestEnv::with_fake_node();
  env.write_config("[gulp]\ntask = \"lint,test\"\n");

  env.nodekit_cmd().arg("gulp").assert().success();

  assert!(env.calls()[0].ends_with("gulp.js lint test"));
}

#[cfg(unix)]
#[test]
#[serial]
fn env_var_wins_over_config() {
  let env = TestEnv::with_fake_node();
  env.write_config("[gulp]\ntask = \"lint\"\n");

  env
    .nodekit_cmd()
    .arg("gulp")
    .env("NODEKIT_GULP_TASK", "release")
    .assert()
    .success();

  assert!(env.calls()[0].ends_with("gulp.js release"));
}
