//! CMake configure and build invocations.
//!
//! Argument construction is kept separate from execution so it can be
//! unit-tested without a CMake install. Success or failure of an
//! invocation is judged solely by the child's exit status; no output is
//! parsed.

use std::path::Path;

use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::process::{self, CmdOutput};

/// File CMake writes into a configured build directory.
pub const CMAKE_CACHE_FILE: &str = "CMakeCache.txt";

/// Project marker expected at the root of the source tree.
pub const PROJECT_FILE: &str = "CMakeLists.txt";

/// Whether the build directory already holds CMake cache state.
pub fn is_configured(build_dir: &Path) -> bool {
  build_dir.join(CMAKE_CACHE_FILE).exists()
}

fn on_off(flag: bool) -> &'static str {
  if flag { "ON" } else { "OFF" }
}

/// Arguments for the configure invocation.
pub fn configure_args(cfg: &BuildConfig) -> Vec<String> {
  let mut args = vec![
    "-S".to_string(),
    cfg.source_dir.display().to_string(),
    "-B".to_string(),
    cfg.build_dir.display().to_string(),
    format!("-DCMAKE_GENERATOR_IDENTIFIER={}", cfg.generator.as_str()),
    format!("-DSKIP_TORCHMLIR_BUILD={}", on_off(cfg.skip_torch_mlir)),
    format!("-DUSE_CCACHE={}", on_off(cfg.use_ccache)),
  ];

  if let Some(python) = &cfg.python_executable {
    args.push(format!("-DPYTHON_EXECUTABLE={}", python.display()));
  }

  if let Some(prebuilt) = &cfg.prebuilt_torch_mlir {
    args.push(format!("-DPREBUILT_TORCHMLIR_DIR={}", prebuilt.display()));
  }

  if !cfg.tools.is_empty() {
    args.push(format!("-DTOOLS_TO_BUILD={}", cfg.tools.join(",")));
  }

  args
}

/// Arguments for building a single target.
pub fn build_args(cfg: &BuildConfig, target: &str) -> Vec<String> {
  let mut args = vec![
    "--build".to_string(),
    cfg.build_dir.display().to_string(),
    "--target".to_string(),
    target.to_string(),
  ];

  if cfg.parallel_jobs > 0 {
    args.push("--parallel".to_string());
    args.push(cfg.parallel_jobs.to_string());
  }

  args
}

/// Run the configure step.
///
/// Fails before invoking anything if the source tree has no CMakeLists.txt.
pub async fn configure(cfg: &BuildConfig) -> Result<CmdOutput, BuildError> {
  if !cfg.source_dir.join(PROJECT_FILE).exists() {
    return Err(BuildError::MissingProjectFile(cfg.source_dir.clone()));
  }

  let out = process::run(&cfg.cmake_program, &configure_args(cfg), &cfg.source_dir).await?;
  if !out.success {
    return Err(BuildError::ConfigureFailed { code: out.code });
  }
  Ok(out)
}

/// Build one target via `cmake --build`.
pub async fn build_target(cfg: &BuildConfig, target: &str) -> Result<CmdOutput, BuildError> {
  let out = process::run(&cfg.cmake_program, &build_args(cfg, target), &cfg.build_dir).await?;
  if !out.success {
    return Err(BuildError::TargetFailed {
      target: target.to_string(),
      code: out.code,
    });
  }
  Ok(out)
}

/// Build the given targets in order, stopping at the first failure.
///
/// Remaining targets are not attempted after a failure.
pub async fn build_targets(cfg: &BuildConfig, targets: &[String]) -> Result<(), BuildError> {
  for target in targets {
    build_target(cfg, target).await?;
  }
  Ok(())
}
