use std::ffi::c_int;

use thiserror::Error;

// ---------------------------------------------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WrapError {

  /// This error appears when a buffer does not hold the number of elements
  /// implied by the problem dimensions. It is raised before any native call.
  #[error("buffer `{what}` holds {found} elements while {expected} are required")]
  BufferShapeMismatch {
    what: &'static str,
    expected: usize,
    found: usize,
  },

  /// This error appears when a matrix representation is structurally broken
  /// (unsorted row pointers, out of range column indices, too narrow band storage).
  #[error("invalid matrix: {0}")]
  InvalidMatrix(&'static str),

  /// This error appears when a dimension or an index does not fit into a native int.
  #[error("value {0} does not fit into a native int")]
  IndexOverflow(usize),

  /// This error appears when a configuration override addresses a slot outside of fpm.
  #[error("configuration slot {0} is outside of the fpm vector")]
  ConfigIndex(usize),

  /// This error carries a nonzero status code reported by the native solver.
  /// The code is never remapped.
  #[error("native solver reported status {0}")]
  NativeSolverFailure(c_int),
}

pub type WrapResult<T> = Result<T, WrapError>;
