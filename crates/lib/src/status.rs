//! Presence checks for the torch-mlir install tree.
//!
//! Whether torch-mlir counts as "already built" is decided purely from the
//! existence of a fixed set of installed files under the build directory.
//! No content or version validation is performed, and nothing is cached
//! across runs.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Derived status of the torch-mlir dependency.
#[derive(Debug, Clone, Serialize)]
pub struct DepStatus {
  pub present: bool,
  /// Human-readable explanation, naming the first missing artifact when
  /// `present` is false.
  pub reason: String,
}

/// Where the torch-mlir sub-build installs within the build tree.
pub fn install_dir(build_dir: &Path) -> PathBuf {
  build_dir.join("ext").join("torch-mlir-install")
}

/// Installed artifacts checked, in order: an executable, a package-config
/// file, a header.
fn key_files(install: &Path) -> [PathBuf; 3] {
  [
    install.join("bin").join("torch-mlir-opt"),
    install
      .join("lib")
      .join("cmake")
      .join("torch-mlir")
      .join("TorchMLIRConfig.cmake"),
    install
      .join("include")
      .join("torch-mlir")
      .join("Dialect")
      .join("Torch")
      .join("IR")
      .join("TorchDialect.h"),
  ]
}

/// Check whether torch-mlir is already built and installed.
///
/// Short-circuits on the first missing artifact.
pub fn check_torch_mlir(build_dir: &Path) -> DepStatus {
  let install = install_dir(build_dir);

  if !install.exists() {
    return DepStatus {
      present: false,
      reason: "install directory doesn't exist".to_string(),
    };
  }

  for file in key_files(&install) {
    if !file.exists() {
      return DepStatus {
        present: false,
        reason: format!("missing key file: {}", file.display()),
      };
    }
  }

  DepStatus {
    present: true,
    reason: "torch-mlir appears to be built".to_string(),
  }
}

/// Decide the torch-mlir skip flag handed through to CMake.
///
/// Advisory only: the flag lets the external build avoid redundant work,
/// it never blocks an action locally. An explicit request always skips;
/// otherwise skip when the dependency is present, unless `force` is set.
pub fn resolve_skip(status: &DepStatus, force: bool, requested: bool) -> bool {
  if requested {
    return true;
  }
  !force && status.present
}

/// Whether the tools build output subdirectory exists yet.
pub fn tools_built(build_dir: &Path) -> bool {
  build_dir.join("src").exists()
}

/// Names of installed tool binaries under `<build-dir>/install/bin`, sorted.
/// Empty when nothing has been installed yet.
pub fn installed_tools(build_dir: &Path) -> Vec<String> {
  let bin_dir = build_dir.join("install").join("bin");

  let Ok(entries) = std::fs::read_dir(&bin_dir) else {
    return Vec::new();
  };

  let mut tools: Vec<String> = entries
    .flatten()
    .map(|entry| entry.file_name().to_string_lossy().into_owned())
    .collect();
  tools.sort();
  tools
}
