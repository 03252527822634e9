//! CLI smoke tests for mtb.
//!
//! These tests verify that all CLI actions run without panicking and
//! return appropriate exit codes. External invocations are driven through
//! a fake cmake stand-in (via MTB_CMAKE) so no real CMake is needed.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the mtb binary.
fn mtb_cmd() -> Command {
  cargo_bin_cmd!("mtb")
}

/// Create a temp directory that looks like a CMake project.
fn temp_project() -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("CMakeLists.txt"), "project(mlir-tools)\n").unwrap();
  temp
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  mtb_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  mtb_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("mtb"));
}

// =============================================================================
// Usage errors
// =============================================================================

#[test]
fn unknown_action_fails() {
  mtb_cmd().arg("frobnicate").assert().failure();
}

#[test]
fn unknown_generator_fails() {
  let temp = temp_project();

  mtb_cmd()
    .arg("configure")
    .arg("--source-dir")
    .arg(temp.path())
    .arg("--generator")
    .arg("xcode")
    .assert()
    .failure();
}

#[test]
fn missing_project_file_fails_before_any_command() {
  let temp = TempDir::new().unwrap();

  mtb_cmd()
    .arg("status")
    .arg("--source-dir")
    .arg(temp.path())
    // Point at a binary that would fail loudly if it were ever invoked.
    .env("MTB_CMAKE", "/nonexistent/cmake")
    .assert()
    .failure()
    .stderr(predicate::str::contains("CMakeLists.txt"));
}

// =============================================================================
// status
// =============================================================================

#[test]
fn status_reports_missing_dependency() {
  let temp = temp_project();

  mtb_cmd()
    .arg("status")
    .arg("--source-dir")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Torch-MLIR"))
    .stdout(predicate::str::contains("Tools not yet built"));
}

#[test]
fn status_json_output() {
  let temp = temp_project();

  mtb_cmd()
    .arg("status")
    .arg("--source-dir")
    .arg(temp.path())
    .arg("--json")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"torch_mlir\""))
    .stdout(predicate::str::contains("\"tools_built\""));
}

// =============================================================================
// clean
// =============================================================================

#[test]
fn clean_missing_build_dir_is_noop_success() {
  let temp = temp_project();

  mtb_cmd()
    .arg("clean")
    .arg("--source-dir")
    .arg(temp.path())
    .arg("--build-dir")
    .arg(temp.path().join("never-created"))
    .assert()
    .success()
    .stderr(predicate::str::contains("doesn't exist"));
}

#[test]
fn clean_removes_existing_build_dir() {
  let temp = temp_project();
  let build = temp.path().join("build");
  std::fs::create_dir_all(build.join("nested")).unwrap();
  std::fs::write(build.join("nested").join("artifact"), "x").unwrap();

  mtb_cmd()
    .arg("clean")
    .arg("--source-dir")
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("cleaned"));

  assert!(!build.exists());
}

// =============================================================================
// configure / build through a fake cmake
// =============================================================================

#[cfg(unix)]
mod fake_cmake {
  use super::*;
  use std::os::unix::fs::PermissionsExt;

  /// Write an executable cmake stand-in that logs its arguments and fails
  /// for the given target.
  fn write_fake(dir: &Path, log: &Path, fail_target: Option<&str>) -> PathBuf {
    let fail_clause = match fail_target {
      Some(target) => format!("case \"$*\" in *\"--target {target}\"*) exit 1 ;; esac\n"),
      None => String::new(),
    };
    let script = format!("#!/bin/sh\necho \"$@\" >> {}\n{}exit 0\n", log.display(), fail_clause);

    let path = dir.join("cmake");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  /// Populate the three torch-mlir install artifacts under a build dir.
  fn populate_dep(build_dir: &Path) {
    let install = build_dir.join("ext").join("torch-mlir-install");
    for rel in [
      "bin/torch-mlir-opt",
      "lib/cmake/torch-mlir/TorchMLIRConfig.cmake",
      "include/torch-mlir/Dialect/Torch/IR/TorchDialect.h",
    ] {
      let file = install.join(rel);
      std::fs::create_dir_all(file.parent().unwrap()).unwrap();
      std::fs::write(&file, "").unwrap();
    }
  }

  #[test]
  fn configure_invokes_generator_once() {
    let temp = temp_project();
    let log = temp.path().join("invocations.log");
    let fake = write_fake(temp.path(), &log, None);

    mtb_cmd()
      .arg("configure")
      .arg("--source-dir")
      .arg(temp.path())
      .env("MTB_CMAKE", &fake)
      .assert()
      .success()
      .stdout(predicate::str::contains("Configured in"));

    let logged = std::fs::read_to_string(&log).unwrap();
    assert_eq!(logged.lines().count(), 1);
    assert!(logged.contains("-DCMAKE_GENERATOR_IDENTIFIER=NINJA"));
    assert!(logged.contains("-DUSE_CCACHE=ON"));
  }

  #[test]
  fn configure_failure_exits_nonzero() {
    let temp = temp_project();
    let log = temp.path().join("invocations.log");
    // Fake tool that always fails.
    let fake = temp.path().join("cmake");
    std::fs::write(&fake, format!("#!/bin/sh\necho \"$@\" >> {}\nexit 1\n", log.display())).unwrap();
    std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

    mtb_cmd()
      .arg("configure")
      .arg("--source-dir")
      .arg(temp.path())
      .env("MTB_CMAKE", &fake)
      .assert()
      .failure()
      .stderr(predicate::str::contains("Configure failed"));
  }

  #[test]
  fn build_configures_on_demand_then_builds_umbrella_target() {
    let temp = temp_project();
    let log = temp.path().join("invocations.log");
    let fake = write_fake(temp.path(), &log, None);
    std::fs::create_dir_all(temp.path().join("build")).unwrap();

    mtb_cmd()
      .arg("build-tools")
      .arg("--source-dir")
      .arg(temp.path())
      .env("MTB_CMAKE", &fake)
      .assert()
      .success()
      .stdout(predicate::str::contains("Build completed successfully"));

    let logged = std::fs::read_to_string(&log).unwrap();
    assert!(logged.contains("-S "), "configure should run first:\n{logged}");
    assert!(logged.contains("--target tools"));
  }

  #[test]
  fn multi_target_build_stops_at_first_failure() {
    let temp = temp_project();
    let log = temp.path().join("invocations.log");
    let fake = write_fake(temp.path(), &log, Some("b"));
    std::fs::create_dir_all(temp.path().join("build")).unwrap();

    mtb_cmd()
      .arg("build-tools")
      .arg("--source-dir")
      .arg(temp.path())
      .arg("--tools")
      .arg("a")
      .arg("b")
      .arg("c")
      .env("MTB_CMAKE", &fake)
      .assert()
      .failure()
      .stderr(predicate::str::contains("Build failed after"));

    let logged = std::fs::read_to_string(&log).unwrap();
    assert!(logged.contains("--target a"));
    assert!(logged.contains("--target b"));
    assert!(!logged.contains("--target c"), "third target must not run:\n{logged}");
  }

  #[test]
  fn present_dependency_enables_advisory_skip() {
    let temp = temp_project();
    let log = temp.path().join("invocations.log");
    let fake = write_fake(temp.path(), &log, None);
    let build = temp.path().join("build");
    std::fs::create_dir_all(&build).unwrap();
    populate_dep(&build);

    mtb_cmd()
      .arg("build-dependency")
      .arg("--source-dir")
      .arg(temp.path())
      .env("MTB_CMAKE", &fake)
      .assert()
      .success()
      .stdout(predicate::str::contains("Torch-MLIR already built"));

    // Advisory only: the dependency target is still driven.
    let logged = std::fs::read_to_string(&log).unwrap();
    assert!(logged.contains("--target torch-mlir"));
  }

  #[test]
  fn force_disables_advisory_skip() {
    let temp = temp_project();
    let log = temp.path().join("invocations.log");
    let fake = write_fake(temp.path(), &log, None);
    let build = temp.path().join("build");
    std::fs::create_dir_all(&build).unwrap();
    populate_dep(&build);

    mtb_cmd()
      .arg("build-dependency")
      .arg("--force")
      .arg("--source-dir")
      .arg(temp.path())
      .env("MTB_CMAKE", &fake)
      .assert()
      .success()
      .stdout(predicate::str::contains("Torch-MLIR already built").not());

    let logged = std::fs::read_to_string(&log).unwrap();
    assert!(logged.contains("--target torch-mlir"));
  }
}
