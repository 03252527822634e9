//! mtb-lib: core logic for the mlir-tools build helper
//!
//! This crate provides the pieces the `mtb` binary orchestrates:
//! - `config`: resolved build options and source/build path handling
//! - `status`: presence checks for the torch-mlir install tree
//! - `cmake`: CMake configure and per-target build invocations
//! - `process`: external command execution
//! - `litcfg`: lit site-config parameter substitution

pub mod cmake;
pub mod config;
pub mod error;
pub mod litcfg;
pub mod process;
pub mod status;
