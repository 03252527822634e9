//! Build command implementation: dependency, tools, or everything.
//!
//! Configures the project first when the build directory has no CMake
//! cache state, applies the advisory torch-mlir skip, then drives
//! `cmake --build` once per target, stopping at the first failure.

use std::time::Instant;

use anyhow::{Context, Result};

use mtb_lib::cmake;
use mtb_lib::config::BuildConfig;
use mtb_lib::status::{self, resolve_skip};

use crate::output::{self, format_duration, print_error, print_info, print_success};

/// Umbrella target driven when no explicit tools are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildKind {
  Dependency,
  Tools,
  All,
}

impl BuildKind {
  fn umbrella(self) -> &'static str {
    match self {
      BuildKind::Dependency => "torch-mlir",
      BuildKind::Tools => "tools",
      BuildKind::All => "all",
    }
  }
}

pub fn cmd_build(cfg: &BuildConfig, kind: BuildKind) -> Result<()> {
  let mut cfg = cfg.clone();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

  if !cmake::is_configured(&cfg.build_dir) {
    print_info("Project not configured, configuring now...");
    rt.block_on(cmake::configure(&cfg)).context("Configure failed")?;
  }

  // Advisory skip: a pass-through hint, CMake still decides what to
  // rebuild.
  if !cfg.force {
    let dep = status::check_torch_mlir(&cfg.build_dir);
    if dep.present && !cfg.skip_torch_mlir {
      print_info(&format!("Torch-MLIR already built: {}", dep.reason));
    }
    cfg.skip_torch_mlir = resolve_skip(&dep, cfg.force, cfg.skip_torch_mlir);
  }

  // Explicit tools only apply to the tools action; dependency and all
  // always drive their umbrella target.
  let targets: Vec<String> = match kind {
    BuildKind::Tools if !cfg.tools.is_empty() => cfg.tools.clone(),
    _ => vec![kind.umbrella().to_string()],
  };

  let start = Instant::now();
  let result = rt.block_on(cmake::build_targets(&cfg, &targets));
  let elapsed = start.elapsed();

  match result {
    Ok(()) => {
      print_success(&format!("Build completed successfully in {}", format_duration(elapsed)));

      let installed = status::installed_tools(&cfg.build_dir);
      if !installed.is_empty() {
        println!();
        println!("Installed tools in {}:", cfg.build_dir.join("install").join("bin").display());
        for tool in installed {
          println!("  {} {}", output::symbols::INFO, tool);
        }
      }
      Ok(())
    }
    Err(e) => {
      print_error(&format!("Build failed after {}", format_duration(elapsed)));
      Err(e.into())
    }
  }
}
