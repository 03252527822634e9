//! Implementation of the `mtb clean` command.

use anyhow::{Context, Result};

use mtb_lib::config::BuildConfig;

use crate::output::{print_success, print_warning};

/// Recursively remove the build directory. A missing build directory is a
/// warning, not an error.
pub fn cmd_clean(cfg: &BuildConfig) -> Result<()> {
  if cfg.build_dir.exists() {
    std::fs::remove_dir_all(&cfg.build_dir)
      .with_context(|| format!("Failed to remove {}", cfg.build_dir.display()))?;
    print_success("Build directory cleaned");
  } else {
    print_warning("Build directory doesn't exist");
  }
  Ok(())
}
