//! mtb - smart build helper for the mlir-tools project.
//!
//! Wraps CMake to configure and build the tools and their optional
//! torch-mlir dependency, avoiding the torch-mlir sub-build when its
//! installed artifacts are already present.

mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mtb_lib::cmake::PROJECT_FILE;
use mtb_lib::config::{self, BuildConfig, DEFAULT_PARALLEL_JOBS, Generator};

use crate::cmd::BuildKind;
use crate::output::{print_error, print_info, print_stat};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Action {
  /// Run the CMake configure step only
  Configure,
  /// Build the torch-mlir dependency
  BuildDependency,
  /// Build the mlir-tools binaries
  #[default]
  BuildTools,
  /// Build everything
  BuildAll,
  /// Remove the build directory
  Clean,
  /// Report dependency and build-tree status
  Status,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum GeneratorArg {
  #[default]
  Ninja,
  Msvc,
}

impl From<GeneratorArg> for Generator {
  fn from(arg: GeneratorArg) -> Self {
    match arg {
      GeneratorArg::Ninja => Generator::Ninja,
      GeneratorArg::Msvc => Generator::Msvc,
    }
  }
}

/// Smart build helper for mlir-tools
#[derive(Parser)]
#[command(name = "mtb")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Action to perform
  #[arg(value_enum, default_value_t = Action::BuildTools)]
  action: Action,

  /// CMake generator to use
  #[arg(long, value_enum, default_value_t = GeneratorArg::Ninja)]
  generator: GeneratorArg,

  /// Python executable to use
  #[arg(long)]
  python_executable: Option<PathBuf>,

  /// Path to a pre-built torch-mlir installation
  #[arg(long)]
  prebuilt_torch_mlir: Option<PathBuf>,

  /// Skip the torch-mlir build if already present
  #[arg(long)]
  skip_torch_mlir: bool,

  /// Use ccache for faster compilation
  // Accepted for compatibility; the default already pins this on, so the
  // flag cannot actually change anything.
  #[arg(long, default_value_t = true)]
  use_ccache: bool,

  /// Specific tools to build (default: all)
  #[arg(long, num_args = 1..)]
  tools: Vec<String>,

  /// Number of parallel jobs
  #[arg(short = 'j', long, default_value_t = DEFAULT_PARALLEL_JOBS)]
  parallel_jobs: u32,

  /// Force rebuild even if not needed
  #[arg(long)]
  force: bool,

  /// Source directory (default: current directory)
  #[arg(long)]
  source_dir: Option<PathBuf>,

  /// Build directory (default: <source-dir>/build)
  #[arg(long)]
  build_dir: Option<PathBuf>,

  /// Emit status output as JSON
  #[arg(long)]
  json: bool,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt().with_env_filter(filter).without_time().init();

  let (source_dir, build_dir) = config::resolve_dirs(cli.source_dir.as_deref(), cli.build_dir.as_deref())?;
  tracing::debug!(action = ?cli.action, source = %source_dir.display(), build = %build_dir.display(), "resolved options");

  let cfg = BuildConfig {
    source_dir,
    build_dir,
    generator: cli.generator.into(),
    parallel_jobs: cli.parallel_jobs,
    python_executable: cli.python_executable,
    prebuilt_torch_mlir: cli.prebuilt_torch_mlir,
    tools: cli.tools,
    skip_torch_mlir: cli.skip_torch_mlir,
    use_ccache: cli.use_ccache,
    force: cli.force,
    cmake_program: std::env::var("MTB_CMAKE").unwrap_or_else(|_| "cmake".to_string()),
  };

  if !cli.json {
    print_info("mlir-tools smart build helper");
    print_stat("Source directory", &cfg.source_dir.display().to_string());
    print_stat("Build directory", &cfg.build_dir.display().to_string());
  }

  // Usage error: nothing is invoked against a tree that isn't a CMake
  // project, whatever the action.
  if !cfg.source_dir.join(PROJECT_FILE).exists() {
    print_error(&format!("No {} found in {}", PROJECT_FILE, cfg.source_dir.display()));
    std::process::exit(1);
  }

  match cli.action {
    Action::Configure => cmd::cmd_configure(&cfg),
    Action::BuildDependency => cmd::cmd_build(&cfg, BuildKind::Dependency),
    Action::BuildTools => cmd::cmd_build(&cfg, BuildKind::Tools),
    Action::BuildAll => cmd::cmd_build(&cfg, BuildKind::All),
    Action::Clean => cmd::cmd_clean(&cfg),
    Action::Status => cmd::cmd_status(&cfg, cli.json),
  }
}
