//! Lit site-config generation.
//!
//! The test harness reads a site config whose path values are filled in at
//! configure time. Field templates use `@NAME@` parameter references;
//! substitution fails on the first parameter with no value, matching the
//! harness's own fatal behavior for missing `--param` values. A lone `@`
//! (or a span that is not a valid parameter name) passes through
//! unchanged, so literal text like email addresses survives.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while resolving parameter references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
  /// A referenced parameter has no value.
  #[error("unable to find '{0}' parameter, use '--param={0}=VALUE'")]
  Missing(String),
}

/// Substitute `@NAME@` references in `template` from `params`.
///
/// A name is one or more ASCII alphanumerics or underscores. Anything
/// between two `@` that is not a valid name is emitted literally.
pub fn substitute(template: &str, params: &BTreeMap<String, String>) -> Result<String, ParamError> {
  let mut out = String::with_capacity(template.len());
  let mut rest = template;

  while let Some(start) = rest.find('@') {
    out.push_str(&rest[..start]);
    let after = &rest[start + 1..];

    match after.find('@') {
      Some(end) => {
        let name = &after[..end];
        if is_param_name(name) {
          match params.get(name) {
            Some(value) => out.push_str(value),
            None => return Err(ParamError::Missing(name.to_string())),
          }
          rest = &after[end + 1..];
        } else {
          // Not a reference, keep the opening @ and rescan from the next
          // character so "a@b@c" still finds "@b@".
          out.push('@');
          rest = after;
        }
      }
      None => {
        out.push('@');
        rest = after;
      }
    }
  }

  out.push_str(rest);
  Ok(out)
}

fn is_param_name(name: &str) -> bool {
  !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Resolved site configuration handed to the test-harness loader.
///
/// All fields are absolute paths or suffixes; nothing here is validated
/// against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LitSiteConfig {
  pub obj_root: String,
  pub src_root: String,
  pub tools_dir: String,
  pub llvm_tools_dir: String,
  pub llvm_shlib_ext: String,
  pub llvm_exe_ext: String,
  pub lit_tools_dir: String,
  pub python_executable: String,
  pub importer_obj_root: String,
  pub importer_tools_dir: String,
}

/// Field templates, resolved against the parameter map in `from_params`.
const FIELD_TEMPLATES: [(&str, &str); 10] = [
  ("obj_root", "@BINARY_DIR@"),
  ("src_root", "@SOURCE_DIR@"),
  ("tools_dir", "@BINARY_DIR@"),
  ("llvm_tools_dir", "@TORCHMLIR_INSTALL_DIR@/bin"),
  ("llvm_shlib_ext", "@LLVM_SHLIBEXT@"),
  ("llvm_exe_ext", "@EXECUTABLE_SUFFIX@"),
  ("lit_tools_dir", "@TORCHMLIR_INSTALL_DIR@/bin"),
  ("python_executable", "@PYTHON_EXECUTABLE@"),
  ("importer_obj_root", "@BINARY_DIR@/onnx_c_importer"),
  ("importer_tools_dir", "@BINARY_DIR@"),
];

impl LitSiteConfig {
  /// Build a site config by substituting every field template.
  ///
  /// Fails with the first missing parameter, naming it.
  pub fn from_params(params: &BTreeMap<String, String>) -> Result<Self, ParamError> {
    let mut resolved = BTreeMap::new();
    for (field, template) in FIELD_TEMPLATES {
      resolved.insert(field, substitute(template, params)?);
    }

    let take = |field: &str| resolved[field].clone();

    Ok(Self {
      obj_root: take("obj_root"),
      src_root: take("src_root"),
      tools_dir: take("tools_dir"),
      llvm_tools_dir: take("llvm_tools_dir"),
      llvm_shlib_ext: take("llvm_shlib_ext"),
      llvm_exe_ext: take("llvm_exe_ext"),
      lit_tools_dir: take("lit_tools_dir"),
      python_executable: take("python_executable"),
      importer_obj_root: take("importer_obj_root"),
      importer_tools_dir: take("importer_tools_dir"),
    })
  }

  /// Render the site config in the line format the harness loader reads.
  pub fn render(&self) -> String {
    let lines = [
      ("mlir_tools_obj_root", &self.obj_root),
      ("mlir_tools_src_root", &self.src_root),
      ("mlir_tools_tools_dir", &self.tools_dir),
      ("llvm_tools_dir", &self.llvm_tools_dir),
      ("llvm_shlib_ext", &self.llvm_shlib_ext),
      ("llvm_exe_ext", &self.llvm_exe_ext),
      ("lit_tools_dir", &self.lit_tools_dir),
      ("python_executable", &self.python_executable),
      ("onnx_c_importer_obj_root", &self.importer_obj_root),
      ("onnx_c_importer_tools_dir", &self.importer_tools_dir),
    ];

    let mut out = String::from("# Generated site configuration for the lit test runner.\n");
    for (key, value) in lines {
      out.push_str(&format!("config.{} = r\"{}\"\n", key, value));
    }
    out
  }
}
