//! Runtime support for generated FEAST wrappers: matrix representations,
//! complex packing, one-based index shifting, the configuration vector and
//! the result bundle returned to callers.

mod error;
mod element;
mod index;
mod matrix;
mod fpm;
mod extent;
mod solution;
#[cfg(test)]
mod init_utils;

pub use error::{WrapError, WrapResult};
pub use element::Element;
pub use index::{one_based, to_c_int, OneBased};
pub use matrix::{Banded, Csr, Dense, MatrixData, Uplo, ensure_same_dim};
pub use fpm::{apply_fpm, Quadrature, FPM_LEN, INITIAL_GUESS};
pub use extent::{Dims, Extent};
pub use solution::{Basis, Contour, Counters, Solution};

pub use num_complex::{Complex32, Complex64};
pub use std::ffi::{c_char, c_int};
