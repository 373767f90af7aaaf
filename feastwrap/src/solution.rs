use std::ffi::c_int;

use num_complex::Complex;

use crate::{
  extent::{
    Dims,
    Extent,
  },
  error::{
    WrapError,
    WrapResult,
  },
};

// ---------------------------------------------------------------------- //

/// Column-major block of vectors, one vector per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Basis<T> {
  data: Vec<T>,
  nrows: usize,
  ncols: usize,
}

impl<T> Basis<T> {
  pub fn from_col_major(data: Vec<T>, nrows: usize, ncols: usize) -> WrapResult<Self> {
    if data.len() != nrows * ncols {
      return Err(WrapError::BufferShapeMismatch { what: "eigenvectors", expected: nrows * ncols, found: data.len() });
    }
    Ok(Self { data, nrows, ncols })
  }

  pub fn nrows(&self) -> usize {
    self.nrows
  }

  pub fn ncols(&self) -> usize {
    self.ncols
  }

  /// Returns the j-th column.
  pub fn column(&self, j: usize) -> Option<&[T]> {
    if j >= self.ncols { return None; }
    Some(&self.data[(j * self.nrows)..((j + 1) * self.nrows)])
  }

  pub fn as_slice(&self) -> &[T] {
    &self.data
  }

  pub fn into_vec(self) -> Vec<T> {
    self.data
  }
}

// ---------------------------------------------------------------------- //

/// Integer outputs of a native call, exactly as the solver left them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
  pub subspace: c_int,
  pub modes: c_int,
  pub loops: c_int,
  pub status: c_int,
}

/// Quadrature nodes and weights of the contour used by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour<R> {
  pub nodes: Vec<Complex<R>>,
  pub weights: Vec<Complex<R>>,
}

// ---------------------------------------------------------------------- //

/// Everything a wrapped FEAST routine returns.
/// `V` is the eigenvalue type, `E` the eigenvector element type and `R` the real type.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<V, E, R> {
  pub eigenvalues: Vec<V>,
  /// Right eigenvectors, n x m0.
  pub eigenvectors: Basis<E>,
  /// Left eigenvectors of two-sided problems, n x m0.
  pub left_eigenvectors: Option<Basis<E>>,
  pub residuals: Vec<R>,
  /// Number of eigenpairs found inside the search region.
  pub modes: usize,
  /// Native status code, 0 on success.
  pub status: c_int,
  /// Subspace size as realized by the solver.
  pub subspace: usize,
  pub loops: usize,
  pub epsout: R,
  pub contour: Option<Contour<R>>,
}

impl<V, E, R> Solution<V, E, R> {

  /// Assembles a solution from the buffers of a finished native call.
  /// The eigenvector buffer is split into right and left halves for
  /// two-sided problems and reshaped to n x m0.
  pub fn assemble(
    dims: &Dims,
    eigenvalues: Vec<V>,
    mut q: Vec<E>,
    residuals: Vec<R>,
    epsout: R,
    counters: Counters,
    contour: Option<Contour<R>>,
  ) -> WrapResult<Self>
  {
    dims.check("eigenvalues", &eigenvalues, Extent::Eigenvalues)?;
    dims.check("eigenvectors", &q, Extent::Eigenvectors)?;
    dims.check("residuals", &residuals, Extent::Residuals)?;
    let left_eigenvectors = if dims.two_sided {
      let left = q.split_off(dims.n * dims.m0);
      Some(Basis::from_col_major(left, dims.n, dims.m0)?)
    } else {
      None
    };
    let eigenvectors = Basis::from_col_major(q, dims.n, dims.m0)?;
    Ok(Self {
      eigenvalues,
      eigenvectors,
      left_eigenvectors,
      residuals,
      modes: usize::try_from(counters.modes).unwrap_or(0),
      status: counters.status,
      subspace: usize::try_from(counters.subspace).unwrap_or(0),
      loops: usize::try_from(counters.loops).unwrap_or(0),
      epsout,
      contour,
    })
  }

  pub fn converged(&self) -> bool {
    self.status == 0
  }

  /// Eigenvalues inside the search region.
  pub fn found_eigenvalues(&self) -> &[V] {
    &self.eigenvalues[..self.modes.min(self.eigenvalues.len())]
  }

  /// Turns a nonzero status into an error carrying the unmodified code.
  pub fn into_result(self) -> WrapResult<Self> {
    match self.status {
      0 => Ok(self),
      code => Err(WrapError::NativeSolverFailure(code)),
    }
  }
}
