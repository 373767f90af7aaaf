use std::fmt::Write;

use rayon::prelude::*;
use tracing::{
  debug,
  info,
};

use crate::{
  axis::{
    scalar,
    IntervalStyle,
    Problem,
  },
  error::{
    GenError,
    GenResult,
  },
  expand::{
    find,
    Variant,
  },
  params::{
    Role,
    TypeTag,
  },
  render::{
    ident,
    local,
    render_call,
    Naming,
  },
};

// ---------------------------------------------------------------------------------- //

const HEADER: &str = "//! Safe FEAST wrappers. Generated by feastgen, do not edit.

#![allow(clippy::too_many_arguments)]

#[allow(unused_imports)]
use feastwrap::{
  apply_fpm,
  ensure_same_dim,
  one_based,
  to_c_int,
  Banded,
  Complex32,
  Complex64,
  Contour,
  Counters,
  Csr,
  Dense,
  Dims,
  Element,
  Extent,
  MatrixData,
  Quadrature,
  Solution,
  Uplo,
  WrapResult,
  FPM_LEN,
  c_char,
  c_int,
};
";

/// Concrete Rust types a wrapper is written in terms of.
struct Types {
  field: &'static str,
  spectral: &'static str,
  vector: &'static str,
  real: &'static str,
  complex: &'static str,
}

impl Types {
  fn of(variant: &Variant) -> Self {
    let d = &variant.descriptor;
    let p = d.precision;
    Self {
      field: scalar(p, d.label.domain()).rust_type(),
      spectral: TypeTag::Spectral(p).resolve(&d.label).rust_type(),
      vector: TypeTag::Vector(p).resolve(&d.label).rust_type(),
      real: p.real_type(),
      complex: p.complex_type(),
    }
  }
}

/// Local name of the parameter playing a role.
fn bound(variant: &Variant, role: Role) -> String {
  variant.params()
    .find(|p| p.role == role)
    .map(|p| local(p).into_owned())
    .unwrap_or_default()
}

fn doc(variant: &Variant, naming: Naming) -> String {
  let d = &variant.descriptor;
  let problem = match d.problem {
    Problem::Standard    => "standard",
    Problem::Generalized => "generalized",
  };
  let region = match d.interval {
    IntervalStyle::ExplicitRange => "eigenvalues in [emin, emax]",
    IntervalStyle::ContourRadius => "eigenvalues in the disk of radius r around emid",
  };
  let mut out = format!(
    "/// Solves the {} eigenvalue problem of a {} {} matrix in {}, searching {}.\n",
    problem,
    format!("{:?}", d.label.domain()).to_lowercase(),
    format!("{:?}", d.label.kind()).to_lowercase(),
    d.storage.title().to_lowercase(),
    region,
  );
  if d.contour {
    out.push_str("/// The contour nodes and weights are returned as well.\n");
  }
  let _ = writeln!(out, "/// Native routine: `{}`.", naming.symbol(d));
  out
}

/// Renders one wrapper function.
pub fn render_wrapper(variant: &Variant, naming: Naming) -> String {
  let d = &variant.descriptor;
  let t = Types::of(variant);
  let matrix = format!("{}<{}>", d.storage.matrix_type(), t.field);
  let generalized = d.problem == Problem::Generalized;

  let mut args = vec![format!("a: &{matrix}")];
  if generalized {
    args.push(format!("b: &{matrix}"));
  }
  match d.interval {
    IntervalStyle::ExplicitRange => {
      args.push(format!("emin: {}", t.real));
      args.push(format!("emax: {}", t.real));
    },
    IntervalStyle::ContourRadius => {
      args.push(format!("emid: {}", t.complex));
      args.push(format!("r: {}", t.real));
    },
  }
  args.push("m0: usize".to_owned());
  args.push("options: &[(usize, c_int)]".to_owned());
  if variant.has_triangle() {
    args.push("uplo: Uplo".to_owned());
  }
  args.push(format!("guess: Option<&[{}]>", t.vector));

  let mut body = vec![
    "let mut fpm = [0 as c_int; FPM_LEN];".to_owned(),
    format!("unsafe {{ sys::{}(fpm.as_mut_ptr()) }};", naming.initializer()),
    "apply_fpm(&mut fpm, options)?;".to_owned(),
  ];
  if generalized {
    body.push("ensure_same_dim(a, b)?;".to_owned());
  }
  let mut dims = format!("let dims = Dims::new(a.dim(), m0).two_sided({})", d.label.is_two_sided());
  if d.contour {
    let quadrature = match d.interval {
      IntervalStyle::ExplicitRange => "Half",
      IntervalStyle::ContourRadius => "Full",
    };
    let _ = write!(dims, ".contour_points(Quadrature::{quadrature}.points(&fpm))");
  }
  dims.push_str(".validated()?;");
  body.push(dims);

  for p in variant.params() {
    let name = local(p);
    let line = match p.role {
      Role::Triangle              => format!("let {name} = c_char::from(uplo);"),
      Role::Dim                   => format!("let {name} = to_c_int(a.dim())?;"),
      Role::Values(op)            => format!("let {name} = <{} as Element>::pack({}.values());", t.field, op.arg()),
      Role::LeadingDim(op)        => format!("let {name} = to_c_int({}.leading_dim())?;", op.arg()),
      Role::LowerBandwidth(op)    => format!("let {name} = to_c_int({}.lower_bandwidth())?;", op.arg()),
      Role::UpperBandwidth(op)    => format!("let {name} = to_c_int({}.upper_bandwidth())?;", op.arg()),
      Role::RowPointers(op)       => format!("let {name} = one_based({}.row_ptr())?;", op.arg()),
      Role::ColumnIndices(op)     => format!("let {name} = one_based({}.col_indices())?;", op.arg()),
      Role::Tolerance             => format!("let mut {name}: {} = 0.0;", t.real),
      Role::Loops
      | Role::Modes
      | Role::Status              => format!("let mut {name}: c_int = 0;"),
      Role::Center                => format!("let {name} = <{} as Element>::pack(std::slice::from_ref(&{}));", t.complex, ident(p)),
      Role::Subspace              => format!("let mut {name} = to_c_int(m0)?;"),
      Role::Eigenvalues           => format!("let mut {name} = dims.zeros::<{}>(Extent::Eigenvalues);", t.spectral),
      Role::Eigenvectors          => format!("let mut {name} = dims.basis::<{}>(&mut fpm, guess)?;", t.vector),
      Role::Residuals             => format!("let mut {name} = dims.zeros::<{}>(Extent::Residuals);", t.real),
      Role::ContourNodes
      | Role::ContourWeights      => format!("let mut {name} = dims.zeros::<{}>(Extent::ContourPoints);", t.complex),
      Role::Config
      | Role::IntervalMin
      | Role::IntervalMax
      | Role::Radius              => continue,
    };
    body.push(line);
  }

  body.push(format!("unsafe {{\n    {};\n  }}", render_call(variant, naming, "sys")));
  body.push(format!(
    "let counters = Counters {{ subspace: {}, modes: {}, loops: {}, status: {} }};",
    bound(variant, Role::Subspace),
    bound(variant, Role::Modes),
    bound(variant, Role::Loops),
    bound(variant, Role::Status),
  ));
  if d.contour {
    body.push(format!(
      "let contour = Some(Contour {{ nodes: <{c} as Element>::unpack({}), weights: <{c} as Element>::unpack({}) }});",
      bound(variant, Role::ContourNodes),
      bound(variant, Role::ContourWeights),
      c = t.complex,
    ));
  } else {
    body.push("let contour = None;".to_owned());
  }
  body.push(format!(
    "Solution::assemble(\n    &dims,\n    <{} as Element>::unpack({}),\n    <{} as Element>::unpack({}),\n    {},\n    {},\n    counters,\n    contour,\n  )",
    t.spectral,
    bound(variant, Role::Eigenvalues),
    t.vector,
    bound(variant, Role::Eigenvectors),
    bound(variant, Role::Residuals),
    bound(variant, Role::Tolerance),
  ));

  let mut out = doc(variant, naming);
  let _ = write!(
    out,
    "pub fn {}(\n{}\n) -> WrapResult<Solution<{}, {}, {}>>\n{{\n{}\n}}\n",
    d.symbol(),
    args.iter().map(|a| format!("  {a},")).collect::<Vec<_>>().join("\n"),
    t.spectral,
    t.vector,
    t.real,
    body.iter().map(|l| format!("  {l}")).collect::<Vec<_>>().join("\n"),
  );
  out
}

/// Renders the wrapper module for the selected routines. Every selected symbol
/// is resolved before anything is rendered.
pub fn render_wrappers(
  variants: &[Variant],
  selection: &[String],
  naming: Naming,
  decl_module: &str,
) -> GenResult<String>
{
  let selected = selection.iter()
    .map(|symbol| find(variants, symbol).ok_or_else(|| GenError::UnknownSymbol(symbol.clone())))
    .collect::<GenResult<Vec<_>>>()?;
  debug!("Selected wrappers: {:?}", selection);
  let functions: Vec<String> = selected.par_iter()
    .map(|v| render_wrapper(v, naming))
    .collect();
  let mut out = String::from(HEADER);
  let _ = writeln!(out, "\nuse {decl_module} as sys;");
  for function in &functions {
    out.push('\n');
    out.push_str(function);
  }
  info!("Rendered {} wrappers", functions.len());
  Ok(out)
}
