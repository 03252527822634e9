//! Implementation of the `mtb configure` command.
//!
//! Issues a single CMake configure invocation with the generator variables
//! derived from the resolved options. Success is the external tool's exit
//! status; no output is parsed.

use anyhow::{Context, Result};

use mtb_lib::cmake;
use mtb_lib::config::BuildConfig;

use crate::output::{format_duration, print_info, print_success};

pub fn cmd_configure(cfg: &BuildConfig) -> Result<()> {
  print_info(&format!("Configuring project in {}", cfg.build_dir.display()));

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let out = rt.block_on(cmake::configure(cfg)).context("Configure failed")?;

  print_success(&format!("Configured in {}", format_duration(out.elapsed)));
  Ok(())
}
