use std::{
  borrow::Cow,
  fmt::Write,
};

use clap::ValueEnum;
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{
  debug,
  info,
};

use crate::{
  axis::Storage,
  error::{
    GenError,
    GenResult,
  },
  expand::{
    Descriptor,
    Variant,
  },
  params::{
    Intent,
    Parameter,
    Role,
    Shape,
  },
};

// ---------------------------------------------------------------------------------- //

/// Symbol decoration of the native library build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Naming {
  /// Undecorated symbols and `feastinit`, as shipped with MKL.
  #[default]
  Mkl,
  /// Fortran-mangled symbols with a trailing underscore, as built from the reference sources.
  Reference,
}

impl Naming {
  pub fn suffix(self) -> &'static str {
    match self {
      Naming::Mkl       => "",
      Naming::Reference => "_",
    }
  }

  pub fn initializer(self) -> String {
    format!("feastinit{}", self.suffix())
  }

  pub fn symbol(self, descriptor: &Descriptor) -> String {
    format!("{}{}", descriptor.symbol(), self.suffix())
  }
}

/// Identifiers the generated code can not use as plain names.
pub const RESERVED: [&str; 51] = [
  "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
  "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod",
  "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
  "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box",
  "do", "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Identifier a parameter is rendered under. The logical name stays untouched.
pub fn ident(param: &Parameter) -> Cow<'static, str> {
  if RESERVED.contains(&param.name) {
    Cow::Owned(format!("{}_", param.name))
  } else {
    Cow::Borrowed(param.name)
  }
}

/// Name of the wrapper-side local bound to a parameter. Matrix values get a
/// distinct name since the plain one is taken by the matrix argument.
pub fn local(param: &Parameter) -> Cow<'static, str> {
  match param.role {
    Role::Values(_) => Cow::Owned(format!("{}_values", param.name)),
    _               => ident(param),
  }
}

fn pointer_type(variant: &Variant, param: &Parameter) -> String {
  format!("{} {}", param.intent.pointer(), param.tag.resolve(&variant.descriptor.label).abi_type())
}

// ---------------------------------------------------------------------------------- //

/// Renders the native declaration of a routine.
pub fn render_decl(variant: &Variant, naming: Naming) -> String {
  let params: Vec<(Cow<str>, String)> = variant.params()
    .map(|p| (ident(p), pointer_type(variant, p)))
    .collect();
  let width = params.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
  let body = params.iter()
    .map(|(name, ty)| format!("    {:width$} {}", format!("{name}:"), ty, width = width + 1))
    .collect::<Vec<_>>()
    .join(",\n");
  format!("  pub fn {}(\n{}\n  );", naming.symbol(&variant.descriptor), body)
}

/// A declaration read back from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDecl {
  pub symbol: String,
  /// (name, pointer type) in declaration order.
  pub params: Vec<(String, String)>,
}

/// Parses a declaration produced by `render_decl`.
pub fn parse_decl(text: &str) -> GenResult<ParsedDecl> {
  let malformed = || GenError::MalformedDeclaration(text.trim().to_owned());
  let rest = text.trim().strip_prefix("pub fn").ok_or_else(malformed)?;
  let (symbol, rest) = rest.split_once('(').ok_or_else(malformed)?;
  let inner = rest.trim_end().strip_suffix(");").ok_or_else(malformed)?;
  let symbol = symbol.trim();
  if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
    return Err(malformed());
  }
  let mut params = Vec::new();
  if !inner.trim().is_empty() {
    for piece in inner.split(',') {
      let (name, ty) = piece.split_once(':').ok_or_else(malformed)?;
      let name = name.trim();
      let ty = ty.split_whitespace().collect::<Vec<_>>().join(" ");
      if name.is_empty() || ty.is_empty() {
        return Err(malformed());
      }
      params.push((name.to_owned(), ty));
    }
  }
  Ok(ParsedDecl { symbol: symbol.to_owned(), params })
}

/// Renders the native call of a routine from inside a wrapper, with one
/// conversion expression per parameter.
pub fn render_call(variant: &Variant, naming: Naming, module: &str) -> String {
  let args = variant.params()
    .map(|p| {
      let name = local(p);
      let native = p.tag.resolve(&variant.descriptor.label);
      match (p.shape, p.intent) {
        (Shape::Scalar, _) if native.is_complex() => format!("{name}.as_ptr()"),
        (Shape::Scalar, Intent::In)               => format!("&{name}"),
        (Shape::Scalar, _)                        => format!("&mut {name}"),
        (Shape::Buffer(_), Intent::In)            => format!("{name}.as_ptr()"),
        (Shape::Buffer(_), _)                     => format!("{name}.as_mut_ptr()"),
      }
    })
    .collect::<Vec<_>>()
    .join(", ");
  format!("{}::{}({})", module, naming.symbol(&variant.descriptor), args)
}

// ---------------------------------------------------------------------------------- //

/// Renders the native declaration module: the initializer block first, then
/// one `extern "C"` block per storage kind.
pub fn render_declarations(
  variants: &[Variant],
  naming: Naming,
  libraries: &[String],
) -> String
{
  let decls: Vec<(Storage, String)> = variants.par_iter()
    .map(|v| (v.descriptor.storage, render_decl(v, naming)))
    .collect();
  let mut out = String::new();
  out.push_str("//! Native FEAST declarations. Generated by feastgen, do not edit.\n\n");
  out.push_str("use std::ffi::{\n  c_int,\n  c_char,\n};\n\n");
  for library in libraries {
    let _ = writeln!(out, "#[link(name = \"{library}\")]");
  }
  let _ = write!(out, "extern \"C\" {{\n  pub fn {}(\n    fpm: *mut c_int\n  );\n}}\n", naming.initializer());
  for storage in Storage::ALL {
    let block: Vec<&str> = decls.iter()
      .filter(|(s, _)| *s == storage)
      .map(|(_, d)| d.as_str())
      .collect();
    if block.is_empty() {
      continue;
    }
    let _ = write!(out, "\n// ---- {} ---- //\n\nextern \"C\" {{\n{}\n}}\n", storage.title(), block.join("\n\n"));
    debug!("Rendered {} declarations for {:?} storage", block.len(), storage);
  }
  info!("Rendered {} native declarations", decls.len());
  out
}

#[cfg(test)]
mod tests {
  use crate::{
    axis::AxisTable,
    error::GenError,
    expand::{expand, find},
  };
  use super::{
    parse_decl,
    render_call,
    render_decl,
    render_declarations,
    Naming,
  };

  #[test]
  fn test_render_dfeast_syev() {
    let variants = expand(&AxisTable::new().unwrap());
    let decl = render_decl(find(&variants, "dfeast_syev").unwrap(), Naming::Mkl);
    let expected = "  pub fn dfeast_syev(
    uplo:   *const c_char,
    n:      *const c_int,
    a:      *const f64,
    lda:    *const c_int,
    fpm:    *const c_int,
    epsout: *mut f64,
    loop_:  *mut c_int,
    emin:   *const f64,
    emax:   *const f64,
    m0:     *mut c_int,
    lambda: *mut f64,
    q:      *mut f64,
    mode:   *mut c_int,
    res:    *mut f64,
    info:   *mut c_int
  );";
    assert_eq!(decl, expected);
  }

  #[test]
  fn test_complex_values_are_passed_as_reals() {
    let variants = expand(&AxisTable::new().unwrap());
    let decl = render_decl(find(&variants, "cfeast_gegvx").unwrap(), Naming::Reference);
    let parsed = parse_decl(&decl).unwrap();
    assert_eq!(parsed.symbol, "cfeast_gegvx_");
    assert!(parsed.params.iter().all(|(_, ty)| !ty.contains("Complex")));
    assert!(parsed.params.contains(&("emid".to_owned(), "*const f32".to_owned())));
    assert!(parsed.params.contains(&("zne".to_owned(), "*mut f32".to_owned())));
  }

  #[test]
  fn test_round_trip() {
    for variant in expand(&AxisTable::new().unwrap()) {
      let parsed = parse_decl(&render_decl(&variant, Naming::Mkl)).unwrap();
      assert_eq!(parsed.symbol, variant.descriptor.symbol());
      let expected: Vec<String> = variant.params()
        .map(|p| format!("{} {}", p.intent.pointer(), p.tag.resolve(&variant.descriptor.label).abi_type()))
        .collect();
      let found: Vec<String> = parsed.params.into_iter().map(|(_, ty)| ty).collect();
      assert_eq!(found, expected);
    }
  }

  #[test]
  fn test_keyword_is_renamed_only_on_output() {
    let variants = expand(&AxisTable::new().unwrap());
    let variant = find(&variants, "cfeast_hbev").unwrap();
    assert!(variant.params().any(|p| p.name == "loop"));
    let parsed = parse_decl(&render_decl(variant, Naming::Mkl)).unwrap();
    assert!(parsed.params.iter().any(|(name, _)| name == "loop_"));
    assert!(parsed.params.iter().all(|(name, _)| name != "loop"));
  }

  #[test]
  fn test_parse_rejects_garbage() {
    for text in ["fn x();", "pub fn x(a: *const f64", "pub fn (a: *const f64);", "pub fn x(a *const f64);", "pub fn x(a: *const f64,);"] {
      assert!(matches!(parse_decl(text), Err(GenError::MalformedDeclaration(_))), "{text}");
    }
    assert!(parse_decl("pub fn x();").unwrap().params.is_empty());
  }

  #[test]
  fn test_render_call() {
    let variants = expand(&AxisTable::new().unwrap());
    let call = render_call(find(&variants, "dfeast_syev").unwrap(), Naming::Mkl, "sys");
    assert_eq!(
      call,
      "sys::dfeast_syev(&uplo, &n, a_values.as_ptr(), &lda, fpm.as_ptr(), &mut epsout, &mut loop_, \
       &emin, &emax, &mut m0, lambda.as_mut_ptr(), q.as_mut_ptr(), &mut mode, res.as_mut_ptr(), &mut info)",
    );
    let call = render_call(find(&variants, "zfeast_gcsrevx").unwrap(), Naming::Reference, "sys");
    assert!(call.starts_with("sys::zfeast_gcsrevx_(&n, sa_values.as_ptr(), isa.as_ptr(), jsa.as_ptr(), fpm.as_ptr()"));
    assert!(call.contains("emid.as_ptr(), &r, &mut m0"));
    assert!(call.ends_with("zne.as_mut_ptr(), wne.as_mut_ptr())"));
  }

  #[test]
  fn test_declarations_module() {
    let variants = expand(&AxisTable::new().unwrap());
    let text = render_declarations(&variants, Naming::Reference, &["feast".to_owned()]);
    assert!(text.contains("#[link(name = \"feast\")]\nextern \"C\" {\n  pub fn feastinit_(\n    fpm: *mut c_int\n  );\n}"));
    assert_eq!(text.matches("extern \"C\" {").count(), 4);
    assert_eq!(text.matches("  pub fn ").count(), 121);
    let dense = text.find("// ---- Dense storage ---- //").unwrap();
    let banded = text.find("// ---- Band storage ---- //").unwrap();
    let sparse = text.find("// ---- Compressed sparse row storage ---- //").unwrap();
    assert!(dense < banded && banded < sparse);
    assert_eq!(text, render_declarations(&variants, Naming::Reference, &["feast".to_owned()]));
  }
}
