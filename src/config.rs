use std::{
  fs,
  path::{
    Path,
    PathBuf,
  },
};

use serde::Deserialize;
use tracing::debug;

use crate::{
  error::{
    GenError,
    GenResult,
  },
  render::Naming,
};

// ---------------------------------------------------------------------------------- //

/// Contents of `feastgen.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
  /// Path the wrapper module reaches the declarations through.
  pub decl_module: String,
  pub naming: Naming,
  /// Routines a safe wrapper is generated for.
  pub wrappers: Vec<String>,
  /// Native libraries the declarations link against.
  pub libraries: Vec<String>,
  pub out_dir: PathBuf,
  pub declarations_file: String,
  pub wrappers_file: String,
}

impl Default for GenConfig {
  fn default() -> Self {
    Self {
      decl_module: "crate::feast_sys".to_owned(),
      naming: Naming::Mkl,
      wrappers: vec!["dfeast_syev".to_owned(), "zfeast_hcsrev".to_owned()],
      libraries: Vec::new(),
      out_dir: PathBuf::from("."),
      declarations_file: "feast_sys.rs".to_owned(),
      wrappers_file: "feast.rs".to_owned(),
    }
  }
}

impl GenConfig {
  pub fn from_toml(text: &str) -> GenResult<Self> {
    Ok(toml::from_str(text)?)
  }

  /// Reads a configuration file. A missing file yields the defaults.
  pub fn load(path: &Path) -> GenResult<Self> {
    if !path.exists() {
      debug!("No configuration at {}, using defaults", path.display());
      return Ok(Self::default());
    }
    let text = fs::read_to_string(path)
      .map_err(|source| GenError::Io { path: path.to_owned(), source })?;
    debug!("Loaded configuration from {}", path.display());
    Self::from_toml(&text)
  }
}
