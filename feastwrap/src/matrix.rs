use std::ffi::c_char;

use crate::{
  element::Element,
  extent::Extent,
  error::{
    WrapError,
    WrapResult,
  },
};

// ---------------------------------------------------------------------- //

/// Which triangle of a symmetric or hermitian matrix the solver reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Uplo {
  #[default]
  Full,
  Lower,
  Upper,
}

impl From<Uplo> for c_char {
  fn from(uplo: Uplo) -> Self {
    match uplo {
      Uplo::Full  => 'F' as c_char,
      Uplo::Lower => 'L' as c_char,
      Uplo::Upper => 'U' as c_char,
    }
  }
}

// ---------------------------------------------------------------------- //

/// Accessors every matrix representation provides to generated wrappers.
pub trait MatrixData<T> {

  /// Number of rows (and columns) of a square matrix.
  fn dim(&self) -> usize;

  /// Number of structurally nonzero elements.
  fn nnz(&self) -> usize;

  /// Raw storage in the layout the solver expects.
  fn values(&self) -> &[T];

  /// Element count of a matrix-side buffer, None for solver-side extents.
  fn count(&self, extent: Extent) -> Option<usize> {
    match extent {
      Extent::Values => Some(self.values().len()),
      _ => None,
    }
  }
}

/// Checks that an auxiliary matrix has the dimension of the main one.
pub fn ensure_same_dim<T>(
  a: &impl MatrixData<T>,
  b: &impl MatrixData<T>,
) -> WrapResult<()>
{
  if a.dim() != b.dim() {
    return Err(WrapError::BufferShapeMismatch { what: "b", expected: a.dim(), found: b.dim() });
  }
  Ok(())
}

// ---------------------------------------------------------------------- //

/// A square matrix stored column by column with a leading dimension `ld >= n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense<T> {
  data: Vec<T>,
  n: usize,
  ld: usize,
}

impl<T> Dense<T> {
  pub fn new(data: Vec<T>, n: usize, ld: usize) -> WrapResult<Self> {
    if ld < n.max(1) { return Err(WrapError::InvalidMatrix("leading dimension is smaller than the matrix dimension")); }
    let expected = ld.checked_mul(n).ok_or(WrapError::InvalidMatrix("dense storage size overflows"))?;
    if data.len() != expected {
      return Err(WrapError::BufferShapeMismatch { what: "dense values", expected, found: data.len() });
    }
    Ok(Self { data, n, ld })
  }

  /// Builds a matrix from a column-major buffer of n * n elements.
  pub fn from_col_major(data: Vec<T>, n: usize) -> WrapResult<Self> {
    Self::new(data, n, n.max(1))
  }

  pub fn leading_dim(&self) -> usize {
    self.ld
  }
}

impl<T> MatrixData<T> for Dense<T> {
  fn dim(&self) -> usize {
    self.n
  }

  fn nnz(&self) -> usize {
    self.n * self.n
  }

  fn values(&self) -> &[T] {
    &self.data
  }
}

// ---------------------------------------------------------------------- //

/// A square band matrix in LAPACK band storage: column j keeps the elements
/// of rows j - ku ..= j + kl, the main diagonal sits in row ku.
/// Symmetric and hermitian routines only read `kl`.
#[derive(Debug, Clone, PartialEq)]
pub struct Banded<T> {
  data: Vec<T>,
  n: usize,
  kl: usize,
  ku: usize,
  ld: usize,
}

impl<T> Banded<T> {
  pub fn new(data: Vec<T>, n: usize, kl: usize, ku: usize, ld: usize) -> WrapResult<Self> {
    let band = kl.checked_add(ku)
      .and_then(|w| w.checked_add(1))
      .ok_or(WrapError::InvalidMatrix("band width overflows"))?;
    if ld < band { return Err(WrapError::InvalidMatrix("leading dimension is smaller than the band")); }
    let expected = ld.checked_mul(n).ok_or(WrapError::InvalidMatrix("band storage size overflows"))?;
    if data.len() != expected {
      return Err(WrapError::BufferShapeMismatch { what: "band values", expected, found: data.len() });
    }
    Ok(Self { data, n, kl, ku, ld })
  }

  pub fn lower_bandwidth(&self) -> usize {
    self.kl
  }

  pub fn upper_bandwidth(&self) -> usize {
    self.ku
  }

  pub fn leading_dim(&self) -> usize {
    self.ld
  }
}

impl<T> MatrixData<T> for Banded<T> {
  fn dim(&self) -> usize {
    self.n
  }

  fn nnz(&self) -> usize {
    (0..self.n).map(|j| {
      let first = j.saturating_sub(self.ku);
      let last = std::cmp::min(self.n - 1, j + self.kl);
      last - first + 1
    }).sum()
  }

  fn values(&self) -> &[T] {
    &self.data
  }
}

// ---------------------------------------------------------------------- //

/// A square matrix in compressed sparse row form with zero-based indices.
/// Indices are shifted to one-based numbering only when they are handed to the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Csr<T> {
  values: Vec<T>,
  col_indices: Vec<usize>,
  row_ptr: Vec<usize>,
  n: usize,
}

impl<T> Csr<T> {
  pub fn new(
    n: usize,
    row_ptr: Vec<usize>,
    col_indices: Vec<usize>,
    values: Vec<T>,
  ) -> WrapResult<Self>
  {
    let rows = n.checked_add(1).ok_or(WrapError::InvalidMatrix("matrix dimension overflows"))?;
    if row_ptr.len() != rows {
      return Err(WrapError::BufferShapeMismatch { what: "row pointers", expected: rows, found: row_ptr.len() });
    }
    if col_indices.len() != values.len() {
      return Err(WrapError::BufferShapeMismatch { what: "column indices", expected: values.len(), found: col_indices.len() });
    }
    if row_ptr[0] != 0 { return Err(WrapError::InvalidMatrix("row pointers must start at zero")); }
    if row_ptr.windows(2).any(|w| w[0] > w[1]) { return Err(WrapError::InvalidMatrix("row pointers must not decrease")); }
    if row_ptr[n] != values.len() { return Err(WrapError::InvalidMatrix("last row pointer must equal the number of nonzeros")); }
    if col_indices.iter().any(|j| *j >= n) { return Err(WrapError::InvalidMatrix("column index out of bounds")); }
    Ok(Self { values, col_indices, row_ptr, n })
  }

  pub fn row_ptr(&self) -> &[usize] {
    &self.row_ptr
  }

  pub fn col_indices(&self) -> &[usize] {
    &self.col_indices
  }
}

impl<T: Element> Csr<T> {
  /// Builds a matrix from (row, column, value) triplets.
  /// Duplicated positions are summed up.
  pub fn from_triplets(n: usize, triplets: &[(usize, usize, T)]) -> WrapResult<Self> {
    if triplets.iter().any(|(i, j, _)| *i >= n || *j >= n) {
      return Err(WrapError::InvalidMatrix("triplet position out of bounds"));
    }
    let mut sorted = triplets.to_vec();
    sorted.sort_by_key(|(i, j, _)| (*i, *j));
    let rows = n.checked_add(1).ok_or(WrapError::InvalidMatrix("matrix dimension overflows"))?;
    let mut row_ptr = vec![0; rows];
    let mut col_indices: Vec<usize> = Vec::with_capacity(sorted.len());
    let mut values: Vec<T> = Vec::with_capacity(sorted.len());
    let mut last: Option<(usize, usize)> = None;
    for (i, j, v) in sorted {
      if last == Some((i, j)) {
        if let Some(acc) = values.last_mut() {
          *acc = *acc + v;
        }
        continue;
      }
      last = Some((i, j));
      row_ptr[i + 1] += 1;
      col_indices.push(j);
      values.push(v);
    }
    for i in 0..n {
      row_ptr[i + 1] += row_ptr[i];
    }
    Self::new(n, row_ptr, col_indices, values)
  }
}

impl<T> MatrixData<T> for Csr<T> {
  fn dim(&self) -> usize {
    self.n
  }

  fn nnz(&self) -> usize {
    self.values.len()
  }

  fn values(&self) -> &[T] {
    &self.values
  }

  fn count(&self, extent: Extent) -> Option<usize> {
    match extent {
      Extent::Values | Extent::ColumnIndices => Some(self.nnz()),
      Extent::RowPointers => Some(self.n + 1),
      _ => None,
    }
  }
}
