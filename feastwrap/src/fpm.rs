use std::ffi::c_int;

use crate::error::{
  WrapError,
  WrapResult,
};

/// Length of the FEAST configuration vector.
pub const FPM_LEN: usize = 64;

/// Zero-based slot of fpm(5): use the content of q as the initial subspace.
pub const INITIAL_GUESS: usize = 4;

/// Writes configuration overrides into an initialized fpm vector.
/// Slots are zero-based, i.e. `(0, 1)` sets fpm(1).
pub fn apply_fpm(
  fpm: &mut [c_int; FPM_LEN],
  overrides: &[(usize, c_int)],
) -> WrapResult<()>
{
  if let Some((slot, _)) = overrides.iter().find(|(slot, _)| *slot >= FPM_LEN) {
    return Err(WrapError::ConfigIndex(*slot));
  }
  for (slot, value) in overrides {
    fpm[*slot] = *value;
  }
  Ok(())
}

// ---------------------------------------------------------------------- //

/// Which contour the solver integrates along. Self-adjoint problems use a half
/// contour with fpm(2) points, all other problems a full contour with fpm(8) points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrature {
  Half,
  Full,
}

impl Quadrature {
  pub fn slot(self) -> usize {
    match self {
      Quadrature::Half => 1,
      Quadrature::Full => 7,
    }
  }

  /// Number of contour points configured in an fpm vector.
  pub fn points(self, fpm: &[c_int; FPM_LEN]) -> usize {
    usize::try_from(fpm[self.slot()]).unwrap_or(0)
  }
}

#[cfg(test)]
mod tests {
  use crate::WrapError;
  use super::{apply_fpm, Quadrature, FPM_LEN};

  #[test]
  fn test_apply_fpm() {
    let mut fpm = [0; FPM_LEN];
    apply_fpm(&mut fpm, &[(0, 1), (1, 16), (63, -3)]).unwrap();
    assert_eq!(fpm[0], 1);
    assert_eq!(fpm[1], 16);
    assert_eq!(fpm[63], -3);
  }

  #[test]
  fn test_apply_fpm_rejects_out_of_range() {
    let mut fpm = [0; FPM_LEN];
    assert_eq!(apply_fpm(&mut fpm, &[(2, 5), (64, 1)]), Err(WrapError::ConfigIndex(64)));
    assert!(fpm.iter().all(|x| *x == 0));
  }

  #[test]
  fn test_quadrature_points() {
    let mut fpm = [0; FPM_LEN];
    fpm[1] = 8;
    fpm[7] = 16;
    assert_eq!(Quadrature::Half.points(&fpm), 8);
    assert_eq!(Quadrature::Full.points(&fpm), 16);
    fpm[7] = -1;
    assert_eq!(Quadrature::Full.points(&fpm), 0);
  }
}
