//! Status command implementation.
//!
//! Reports whether torch-mlir is installed and whether the tools build
//! output exists. Performs no mutation.

use anyhow::Result;

use mtb_lib::config::BuildConfig;
use mtb_lib::status::{check_torch_mlir, tools_built};

use crate::output::{print_info, print_json, print_stat};

pub fn cmd_status(cfg: &BuildConfig, json: bool) -> Result<()> {
  let dep = check_torch_mlir(&cfg.build_dir);
  let tools = tools_built(&cfg.build_dir);

  if json {
    let json_output = serde_json::json!({
      "build_dir": cfg.build_dir,
      "torch_mlir": dep,
      "tools_built": tools,
    });
    print_json(&json_output)?;
  } else {
    print_stat("Torch-MLIR", &dep.reason);
    if tools {
      print_info("Tools build directory exists");
    } else {
      print_info("Tools not yet built");
    }
  }

  Ok(())
}
