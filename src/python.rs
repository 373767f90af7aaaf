use pyo3::{
  prelude::*,
  exceptions::{
    PyRuntimeError,
    PyValueError,
  },
};
use numpy::PyArray1;
use clap::ValueEnum;

use feastwrap::{
  c_int,
  Complex64,
  Element,
};

use crate::{
  AxisTable,
  GenError,
  Naming,
  expand,
  render_declarations,
  render_wrappers,
};

// ------------------------------------------------------------------------------- //

impl From<GenError> for PyErr {
  fn from(err: GenError) -> Self {
    PyRuntimeError::new_err(err.to_string())
  }
}

fn parse_naming(name: &str) -> PyResult<Naming> {
  Naming::from_str(name, true).map_err(PyValueError::new_err)
}

/// Renders the native declaration module.
/// Args:
///     naming (str): symbol flavor, "mkl" or "reference";
///     libraries (List[str]): link names of the native libraries.
/// Returns:
///     [str]: Rust source text.
#[pyfunction]
#[pyo3(text_signature = "(naming, libraries)")]
fn declarations(naming: &str, libraries: Vec<String>) -> PyResult<String> {
  let variants = expand(&AxisTable::new()?);
  Ok(render_declarations(&variants, parse_naming(naming)?, &libraries))
}

/// Renders safe wrappers of the selected routines.
/// Args:
///     symbols (List[str]): routine names, e.g. ["dfeast_syev"];
///     naming (str): symbol flavor, "mkl" or "reference";
///     decl_module (str): path of the declaration module.
/// Returns:
///     [str]: Rust source text.
#[pyfunction]
#[pyo3(text_signature = "(symbols, naming, decl_module)")]
fn wrappers(symbols: Vec<String>, naming: &str, decl_module: &str) -> PyResult<String> {
  let variants = expand(&AxisTable::new()?);
  Ok(render_wrappers(&variants, &symbols, parse_naming(naming)?, decl_module)?)
}

/// Lists every routine name in canonical order.
#[pyfunction]
fn symbols() -> PyResult<Vec<String>> {
  let variants = expand(&AxisTable::new()?);
  Ok(variants.iter().map(|v| v.descriptor.symbol()).collect())
}

/// Interleaves a complex array into real and imaginary parts.
#[pyfunction]
fn interleave<'py>(py: Python<'py>, values: &PyArray1<Complex64>) -> PyResult<&'py PyArray1<f64>> {
  let values = unsafe { values.as_slice()? };
  let packed = Complex64::pack(values);
  Ok(PyArray1::from_slice(py, &packed[..]))
}

/// Shifts zero-based indices to one-based ones. The input array is left untouched.
#[pyfunction]
fn one_based<'py>(py: Python<'py>, indices: &PyArray1<usize>) -> PyResult<&'py PyArray1<c_int>> {
  let indices = unsafe { indices.as_slice()? };
  let shifted = feastwrap::one_based(indices).map_err(|e| PyValueError::new_err(e.to_string()))?;
  Ok(PyArray1::from_vec(py, shifted))
}

/// Generator of Rust bindings for the FEAST eigenvalue solver family.
#[pymodule]
fn feastgen(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
  m.add_function(wrap_pyfunction!(declarations, m)?)?;
  m.add_function(wrap_pyfunction!(wrappers, m)?)?;
  m.add_function(wrap_pyfunction!(symbols, m)?)?;
  m.add_function(wrap_pyfunction!(interleave, m)?)?;
  m.add_function(wrap_pyfunction!(one_based, m)?)?;
  Ok(())
}
