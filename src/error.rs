use std::path::PathBuf;

use thiserror::Error;

use crate::axis::{
  Domain,
  Kind,
  Storage,
};

// ---------------------------------------------------------------------------------- //

/// Errors of the generation pass. All of them are fatal: no artifact is written
/// once one of them has been raised.
#[derive(Debug, Error)]
pub enum GenError {

  /// This error appears when a (domain, kind) pair outside of the valid set is requested,
  /// e.g. a real hermitian label.
  #[error("{domain:?} domain cannot be combined with the {kind:?} kind")]
  UnknownAxisCombination {
    domain: Domain,
    kind: Kind,
  },

  /// This error appears when a routine table row pairs a storage kind with
  /// parameter groups that cannot describe it, or lists a label twice.
  #[error("{storage:?} storage cannot host {domain:?} {kind:?} routines: {reason}")]
  UnsupportedStorageOrKindPairing {
    storage: Storage,
    domain: Domain,
    kind: Kind,
    reason: &'static str,
  },

  /// This error appears when a selected wrapper names a routine that does not exist.
  #[error("no routine is named `{0}`")]
  UnknownSymbol(String),

  /// This error appears when a declaration can not be parsed back.
  #[error("malformed declaration `{0}`")]
  MalformedDeclaration(String),

  /// This error appears when the configuration file is not valid TOML
  /// or has unknown keys.
  #[error("invalid configuration: {0}")]
  Config(#[from] toml::de::Error),

  /// This error appears when the manifest can not be serialized.
  #[error("manifest serialization failed: {0}")]
  Manifest(#[from] serde_json::Error),

  /// This error appears when reading the configuration or writing an artifact fails.
  #[error("i/o failure on {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type GenResult<T> = Result<T, GenError>;
