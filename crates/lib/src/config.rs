//! Build configuration resolved from command-line options.
//!
//! A `BuildConfig` is created once per invocation and not persisted. The
//! only field mutated after resolution is the advisory torch-mlir skip flag
//! (see `status::resolve_skip`).

use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Default number of parallel build jobs.
pub const DEFAULT_PARALLEL_JOBS: u32 = 2;

/// CMake generator selection, passed through as `CMAKE_GENERATOR_IDENTIFIER`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Generator {
  #[default]
  Ninja,
  Msvc,
}

impl Generator {
  /// The identifier the CMake project expects.
  pub fn as_str(self) -> &'static str {
    match self {
      Generator::Ninja => "NINJA",
      Generator::Msvc => "MSVC",
    }
  }
}

/// Resolved options for one helper invocation.
#[derive(Debug, Clone)]
pub struct BuildConfig {
  /// Root of the source tree (must contain CMakeLists.txt).
  pub source_dir: PathBuf,

  /// Build tree, `<source-dir>/build` unless overridden.
  pub build_dir: PathBuf,

  pub generator: Generator,

  /// Parallelism hint forwarded to `cmake --build --parallel`.
  pub parallel_jobs: u32,

  /// Python interpreter forwarded as `PYTHON_EXECUTABLE`.
  pub python_executable: Option<PathBuf>,

  /// Existing torch-mlir install forwarded as `PREBUILT_TORCHMLIR_DIR`.
  pub prebuilt_torch_mlir: Option<PathBuf>,

  /// Explicit tool targets; empty means the umbrella target.
  pub tools: Vec<String>,

  /// Pass-through hint telling CMake to skip the torch-mlir sub-build.
  pub skip_torch_mlir: bool,

  pub use_ccache: bool,

  /// Force a rebuild even when torch-mlir is already present.
  pub force: bool,

  /// Program used for all CMake invocations. Overridable so tests can
  /// stand in a fake tool.
  pub cmake_program: String,
}

impl BuildConfig {
  pub fn new(source_dir: PathBuf, build_dir: PathBuf) -> Self {
    Self {
      source_dir,
      build_dir,
      generator: Generator::default(),
      parallel_jobs: DEFAULT_PARALLEL_JOBS,
      python_executable: None,
      prebuilt_torch_mlir: None,
      tools: Vec::new(),
      skip_torch_mlir: false,
      use_ccache: true,
      force: false,
      cmake_program: "cmake".to_string(),
    }
  }
}

/// Resolve the source and build directories from optional overrides.
///
/// The source directory defaults to the current directory and must exist.
/// The default build directory (`<source>/build`) is created on disk when
/// missing; an explicit build directory is only made absolute, never created.
pub fn resolve_dirs(source: Option<&Path>, build: Option<&Path>) -> Result<(PathBuf, PathBuf), BuildError> {
  let source_dir = match source {
    Some(dir) => dunce::canonicalize(dir)?,
    None => std::env::current_dir()?,
  };

  let build_dir = match build {
    Some(dir) => absolutize(dir)?,
    None => {
      let dir = source_dir.join("build");
      std::fs::create_dir_all(&dir)?;
      dir
    }
  };

  Ok((source_dir, build_dir))
}

/// Make a path absolute without requiring it to exist.
fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
  if path.exists() {
    dunce::canonicalize(path)
  } else if path.is_absolute() {
    Ok(path.to_path_buf())
  } else {
    Ok(std::env::current_dir()?.join(path))
  }
}
