use std::borrow::Cow;

use num_complex::{
  Complex,
  Complex32,
  Complex64,
};
use num_traits::{
  Float,
  Zero,
};

// ---------------------------------------------------------------------- //

/// Scalars that cross the FEAST ABI. Real values are passed as they are,
/// complex values are passed as interleaved (re, im) pairs of their real type:
/// the real part sits at even offsets and the imaginary part at odd offsets.
pub trait Element: Copy + Zero + Send + Sync + 'static {
  type Real: Float + Send + Sync + 'static;

  /// Number of ABI scalars one element occupies.
  const WIDTH: usize;

  /// Converts a buffer into its ABI form. Real buffers are borrowed.
  fn pack(src: &[Self]) -> Cow<'_, [Self::Real]>;

  /// Converts an ABI buffer back into elements.
  fn unpack(src: Vec<Self::Real>) -> Vec<Self>;

  /// Allocates a zeroed ABI buffer able to hold `len` elements.
  fn abi_zeros(len: usize) -> Vec<Self::Real> {
    vec![<Self::Real as Zero>::zero(); len * Self::WIDTH]
  }
}

macro_rules! real_element_impl {
  ($type:ty) => {
    impl Element for $type
    {
      type Real = $type;
      const WIDTH: usize = 1;

      #[inline]
      fn pack(src: &[Self]) -> Cow<'_, [Self::Real]> {
        Cow::Borrowed(src)
      }

      #[inline]
      fn unpack(src: Vec<Self::Real>) -> Vec<Self> {
        src
      }
    }
  };
}

real_element_impl!(f32);
real_element_impl!(f64);

macro_rules! complex_element_impl {
  ($type:ty, $real_type:ty) => {
    impl Element for $type
    {
      type Real = $real_type;
      const WIDTH: usize = 2;

      fn pack(src: &[Self]) -> Cow<'_, [Self::Real]> {
        Cow::Owned(src.iter().flat_map(|x| [x.re, x.im]).collect())
      }

      fn unpack(src: Vec<Self::Real>) -> Vec<Self> {
        src.chunks_exact(2).map(|pair| Complex::new(pair[0], pair[1])).collect()
      }
    }
  };
}

complex_element_impl!(Complex32, f32);
complex_element_impl!(Complex64, f64);
