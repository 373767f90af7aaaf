use std::ffi::c_int;

use crate::error::{
  WrapError,
  WrapResult,
};

// ---------------------------------------------------------------------- //

/// Converts a dimension or an index into a native int.
#[inline]
pub fn to_c_int(value: usize) -> WrapResult<c_int> {
  c_int::try_from(value).map_err(|_| WrapError::IndexOverflow(value))
}

/// Returns a one-based copy of a zero-based index buffer.
/// The source buffer is left untouched.
pub fn one_based(indices: &[usize]) -> WrapResult<Vec<c_int>> {
  indices.iter().map(|&i| {
    let shifted = i.checked_add(1).ok_or(WrapError::IndexOverflow(i))?;
    to_c_int(shifted)
  }).collect()
}

// ---------------------------------------------------------------------- //

/// Shifts a caller-owned index buffer to one-based numbering in place.
/// The buffer is shifted back to zero-based numbering when the guard is dropped,
/// so the caller gets its buffer back unchanged once the native call is over.
pub struct OneBased<'a> {
  indices: &'a mut [c_int],
}

impl<'a> OneBased<'a> {
  pub fn new(indices: &'a mut [c_int]) -> WrapResult<Self> {
    if let Some(x) = indices.iter().find(|x| **x == c_int::MAX) {
      return Err(WrapError::IndexOverflow(*x as usize));
    }
    indices.iter_mut().for_each(|x| *x += 1);
    Ok(Self { indices })
  }

  pub fn as_ptr(&self) -> *const c_int {
    self.indices.as_ptr()
  }

  pub fn as_slice(&self) -> &[c_int] {
    self.indices
  }
}

impl Drop for OneBased<'_> {
  fn drop(&mut self) {
    self.indices.iter_mut().for_each(|x| *x -= 1);
  }
}

#[cfg(test)]
mod tests {
  use std::ffi::c_int;
  use crate::{
    WrapError,
    init_utils::random_indices,
  };
  use super::{one_based, to_c_int, OneBased};

  #[test]
  fn test_one_based_copy() {
    let src = vec![0, 1, 2];
    let shifted = one_based(&src).unwrap();
    assert_eq!(shifted, vec![1, 2, 3]);
    assert_eq!(src, vec![0, 1, 2]);
  }

  #[test]
  fn test_one_based_random() {
    let src = random_indices(200, 1000);
    let shifted = one_based(&src).unwrap();
    assert!(src.iter().zip(&shifted).all(|(z, o)| *o as usize == *z + 1));
  }

  #[test]
  fn test_one_based_overflow() {
    let src = [c_int::MAX as usize];
    assert_eq!(one_based(&src), Err(WrapError::IndexOverflow(c_int::MAX as usize + 1)));
    assert_eq!(one_based(&[usize::MAX]), Err(WrapError::IndexOverflow(usize::MAX)));
  }

  #[test]
  fn test_guard_restores_buffer() {
    let mut buff: Vec<c_int> = vec![0, 1, 2];
    {
      let guard = OneBased::new(&mut buff).unwrap();
      assert_eq!(guard.as_slice(), &[1, 2, 3]);
      assert_eq!(unsafe { *guard.as_ptr() }, 1);
    }
    assert_eq!(buff, vec![0, 1, 2]);
  }

  #[test]
  fn test_guard_rejects_max() {
    let mut buff: Vec<c_int> = vec![0, c_int::MAX];
    assert!(OneBased::new(&mut buff).is_err());
    assert_eq!(buff, vec![0, c_int::MAX]);
  }

  #[test]
  fn test_to_c_int() {
    assert_eq!(to_c_int(42), Ok(42));
    assert!(to_c_int(usize::MAX).is_err());
  }
}
