use std::ffi::c_int;

use serde::Serialize;

use crate::{
  element::Element,
  error::{
    WrapError,
    WrapResult,
  },
  fpm::{
    FPM_LEN,
    INITIAL_GUESS,
  },
};

// ---------------------------------------------------------------------- //

/// Derivation rule for the element count of a buffer parameter.
/// Counts are never stored with a parameter; they are computed from the
/// dimensions of a concrete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extent {
  /// The configuration vector.
  Config,
  /// Matrix storage: ld * n for dense and band storage, nnz for CSR.
  Values,
  /// CSR row pointers, n + 1.
  RowPointers,
  /// CSR column indices, nnz.
  ColumnIndices,
  /// m0.
  Eigenvalues,
  /// n * m0, doubled for two-sided problems (right then left vectors).
  Eigenvectors,
  /// m0, doubled for two-sided problems.
  Residuals,
  /// Number of contour points.
  ContourPoints,
}

// ---------------------------------------------------------------------- //

/// Dimensions of one native call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dims {
  pub n: usize,
  pub m0: usize,
  pub two_sided: bool,
  pub contour_points: usize,
}

impl Dims {
  pub fn new(n: usize, m0: usize) -> Self {
    Self { n, m0, two_sided: false, contour_points: 0 }
  }

  pub fn two_sided(mut self, two_sided: bool) -> Self {
    self.two_sided = two_sided;
    self
  }

  pub fn contour_points(mut self, contour_points: usize) -> Self {
    self.contour_points = contour_points;
    self
  }

  /// Rejects a subspace size outside of 1 ..= n. Runs before any output
  /// buffer is allocated.
  pub fn validated(self) -> WrapResult<Self> {
    if self.m0 == 0 || self.m0 > self.n {
      return Err(WrapError::BufferShapeMismatch { what: "m0", expected: self.n, found: self.m0 });
    }
    Ok(self)
  }

  /// Element count of a solver-side buffer, None for matrix-side extents.
  pub fn count(&self, extent: Extent) -> Option<usize> {
    let sides = if self.two_sided { 2 } else { 1 };
    match extent {
      Extent::Config        => Some(FPM_LEN),
      Extent::Eigenvalues   => Some(self.m0),
      Extent::Eigenvectors  => Some(sides * self.n * self.m0),
      Extent::Residuals     => Some(sides * self.m0),
      Extent::ContourPoints => Some(self.contour_points),
      Extent::Values | Extent::RowPointers | Extent::ColumnIndices => None,
    }
  }

  /// Zeroed ABI buffer for a solver-side output.
  pub fn zeros<T: Element>(&self, extent: Extent) -> Vec<T::Real> {
    T::abi_zeros(self.count(extent).unwrap_or(0))
  }

  /// Checks a caller-supplied buffer against an extent.
  pub fn check<T>(
    &self,
    what: &'static str,
    buff: &[T],
    extent: Extent,
  ) -> WrapResult<()>
  {
    match self.count(extent) {
      Some(expected) if expected != buff.len() => {
        Err(WrapError::BufferShapeMismatch { what, expected, found: buff.len() })
      },
      _ => Ok(()),
    }
  }

  /// Eigenvector buffer handed to the solver. With an initial guess the buffer
  /// is filled from it and fpm(5) is switched on.
  pub fn basis<T: Element>(
    &self,
    fpm: &mut [c_int; FPM_LEN],
    guess: Option<&[T]>,
  ) -> WrapResult<Vec<T::Real>>
  {
    match guess {
      Some(guess) => {
        self.check("guess", guess, Extent::Eigenvectors)?;
        fpm[INITIAL_GUESS] = 1;
        Ok(T::pack(guess).into_owned())
      },
      None => Ok(self.zeros::<T>(Extent::Eigenvectors)),
    }
  }
}

#[cfg(test)]
mod tests {
  use num_complex::Complex64;
  use crate::{
    WrapError,
    FPM_LEN,
  };
  use super::{Dims, Extent};

  #[test]
  fn test_counts() {
    let dims = Dims::new(10, 4).contour_points(8);
    assert_eq!(dims.count(Extent::Config), Some(64));
    assert_eq!(dims.count(Extent::Eigenvalues), Some(4));
    assert_eq!(dims.count(Extent::Eigenvectors), Some(40));
    assert_eq!(dims.count(Extent::Residuals), Some(4));
    assert_eq!(dims.count(Extent::ContourPoints), Some(8));
    assert_eq!(dims.count(Extent::Values), None);
    let dims = dims.two_sided(true);
    assert_eq!(dims.count(Extent::Eigenvalues), Some(4));
    assert_eq!(dims.count(Extent::Eigenvectors), Some(80));
    assert_eq!(dims.count(Extent::Residuals), Some(8));
  }

  #[test]
  fn test_subspace_size_bounds() {
    assert_eq!(Dims::new(3, 3).validated(), Ok(Dims::new(3, 3)));
    assert!(Dims::new(3, 1).two_sided(true).validated().is_ok());
    assert_eq!(
      Dims::new(3, 0).validated(),
      Err(WrapError::BufferShapeMismatch { what: "m0", expected: 3, found: 0 }),
    );
    assert_eq!(
      Dims::new(3, i32::MAX as usize).validated(),
      Err(WrapError::BufferShapeMismatch { what: "m0", expected: 3, found: i32::MAX as usize }),
    );
    assert!(Dims::new(0, 1).validated().is_err());
  }

  #[test]
  fn test_zeros_are_packed() {
    let dims = Dims::new(3, 2);
    assert_eq!(dims.zeros::<f32>(Extent::Eigenvectors).len(), 6);
    assert_eq!(dims.zeros::<Complex64>(Extent::Eigenvectors).len(), 12);
  }

  #[test]
  fn test_check() {
    let dims = Dims::new(3, 2);
    assert!(dims.check("q", &[0f64; 6], Extent::Eigenvectors).is_ok());
    assert_eq!(
      dims.check("q", &[0f64; 5], Extent::Eigenvectors),
      Err(WrapError::BufferShapeMismatch { what: "q", expected: 6, found: 5 }),
    );
  }

  #[test]
  fn test_basis_with_guess() {
    let dims = Dims::new(2, 1);
    let mut fpm = [0; FPM_LEN];
    let guess = [Complex64::new(1., -1.), Complex64::new(0., 2.)];
    let q = dims.basis(&mut fpm, Some(&guess[..])).unwrap();
    assert_eq!(q, vec![1., -1., 0., 2.]);
    assert_eq!(fpm[4], 1);
  }

  #[test]
  fn test_basis_rejects_bad_guess() {
    let dims = Dims::new(2, 2);
    let mut fpm = [0; FPM_LEN];
    let err = dims.basis(&mut fpm, Some(&[1f64, 2., 3.][..])).unwrap_err();
    assert_eq!(err, WrapError::BufferShapeMismatch { what: "guess", expected: 4, found: 3 });
    assert_eq!(fpm[4], 0);
    assert_eq!(dims.basis::<f64>(&mut fpm, None).unwrap(), vec![0.; 4]);
  }
}
