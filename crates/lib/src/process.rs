//! External command execution.
//!
//! Commands run in the caller's environment with stdio inherited, so the
//! build tool's own progress output streams straight through. Each
//! invocation is synchronous from the caller's perspective: `run` resolves
//! only once the child has exited.

use std::path::Path;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::BuildError;

/// Outcome of one external invocation. Output is not captured.
#[derive(Debug, Clone)]
pub struct CmdOutput {
  pub success: bool,
  pub code: Option<i32>,
  pub elapsed: Duration,
}

/// Run `program` with `args` in `cwd`, waiting for the child to exit.
///
/// A nonzero exit is not an error here; callers decide what a failure
/// means. Only failing to start the process at all is an `Err`.
pub async fn run(program: &str, args: &[String], cwd: &Path) -> Result<CmdOutput, BuildError> {
  info!(program = %program, args = ?args, cwd = %cwd.display(), "running command");

  let start = Instant::now();
  let status = Command::new(program)
    .args(args)
    .current_dir(cwd)
    .status()
    .await
    .map_err(|e| BuildError::Spawn {
      program: program.to_string(),
      source: e,
    })?;
  let elapsed = start.elapsed();

  debug!(code = ?status.code(), elapsed = ?elapsed, "command finished");

  Ok(CmdOutput {
    success: status.success(),
    code: status.code(),
    elapsed,
  })
}
