//! Error types for build orchestration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or building the project.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The source tree does not look like a CMake project.
  #[error("no CMakeLists.txt found in {0}")]
  MissingProjectFile(PathBuf),

  /// The configure invocation exited nonzero.
  #[error("configure failed with exit code {code:?}")]
  ConfigureFailed { code: Option<i32> },

  /// A build invocation for one target exited nonzero.
  #[error("target '{target}' failed with exit code {code:?}")]
  TargetFailed { target: String, code: Option<i32> },

  /// The external program could not be started at all.
  #[error("failed to run '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// I/O error during path resolution or cleanup.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
