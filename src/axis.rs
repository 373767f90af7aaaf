use serde::Serialize;

use crate::{
  error::{
    GenError,
    GenResult,
  },
  params::GroupName,
};

// ---------------------------------------------------------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
  Single,
  Double,
}

impl Precision {
  pub const ALL: [Precision; 2] = [Precision::Single, Precision::Double];

  pub fn real_type(self) -> &'static str {
    match self {
      Precision::Single => "f32",
      Precision::Double => "f64",
    }
  }

  pub fn complex_type(self) -> &'static str {
    match self {
      Precision::Single => "Complex32",
      Precision::Double => "Complex64",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
  Real,
  Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
  Symmetric,
  Hermitian,
  General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Storage {
  Dense,
  Banded,
  Sparse,
}

impl Storage {
  pub const ALL: [Storage; 3] = [Storage::Dense, Storage::Banded, Storage::Sparse];

  pub fn title(self) -> &'static str {
    match self {
      Storage::Dense  => "Dense storage",
      Storage::Banded => "Band storage",
      Storage::Sparse => "Compressed sparse row storage",
    }
  }

  /// Matrix representation a wrapper accepts.
  pub fn matrix_type(self) -> &'static str {
    match self {
      Storage::Dense  => "Dense",
      Storage::Banded => "Banded",
      Storage::Sparse => "Csr",
    }
  }
}

/// Standard problems solve A x = l x, generalized ones A x = l B x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Problem {
  Standard,
  Generalized,
}

impl Problem {
  pub const ALL: [Problem; 2] = [Problem::Standard, Problem::Generalized];

  pub fn fragment(self) -> char {
    match self {
      Problem::Standard    => 'e',
      Problem::Generalized => 'g',
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalStyle {
  /// Real search interval [emin, emax].
  ExplicitRange,
  /// Disk of radius r around a complex center emid.
  ContourRadius,
}

// ---------------------------------------------------------------------------------- //

/// A validated (domain, kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Label {
  domain: Domain,
  kind: Kind,
}

impl Label {
  pub fn new(domain: Domain, kind: Kind) -> GenResult<Self> {
    match (domain, kind) {
      (Domain::Real, Kind::Hermitian) => Err(GenError::UnknownAxisCombination { domain, kind }),
      _ => Ok(Self { domain, kind }),
    }
  }

  pub fn domain(&self) -> Domain {
    self.domain
  }

  pub fn kind(&self) -> Kind {
    self.kind
  }

  /// Real symmetric and complex hermitian matrices have a real spectrum and
  /// are searched on a real interval; everything else is searched in a disk.
  pub fn interval_style(&self) -> IntervalStyle {
    match (self.domain, self.kind) {
      (Domain::Real, Kind::Symmetric) | (Domain::Complex, Kind::Hermitian) => IntervalStyle::ExplicitRange,
      _ => IntervalStyle::ContourRadius,
    }
  }

  pub fn is_self_adjoint(&self) -> bool {
    self.interval_style() == IntervalStyle::ExplicitRange
  }

  /// General problems return right and left eigenvectors.
  pub fn is_two_sided(&self) -> bool {
    self.kind == Kind::General
  }
}

// ---------------------------------------------------------------------------------- //

/// Native scalar a parameter resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Native {
  Int,
  Char,
  Real(Precision),
  Complex(Precision),
}

impl Native {
  /// Rust type of a value on the wrapper side.
  pub fn rust_type(self) -> &'static str {
    match self {
      Native::Int        => "c_int",
      Native::Char       => "c_char",
      Native::Real(p)    => p.real_type(),
      Native::Complex(p) => p.complex_type(),
    }
  }

  /// Type the native routine sees. Neither precision has a native complex
  /// type on the FEAST ABI, so complex values travel as interleaved reals.
  pub fn abi_type(self) -> &'static str {
    match self {
      Native::Complex(p) => p.real_type(),
      other              => other.rust_type(),
    }
  }

  pub fn is_complex(self) -> bool {
    matches!(self, Native::Complex(_))
  }
}

/// Element type of a (precision, domain) pair.
pub fn scalar(precision: Precision, domain: Domain) -> Native {
  match domain {
    Domain::Real    => Native::Real(precision),
    Domain::Complex => Native::Complex(precision),
  }
}

/// Leading letter of a routine name.
pub fn type_fragment(precision: Precision, domain: Domain) -> char {
  match (precision, domain) {
    (Precision::Single, Domain::Real)    => 's',
    (Precision::Double, Domain::Real)    => 'd',
    (Precision::Single, Domain::Complex) => 'c',
    (Precision::Double, Domain::Complex) => 'z',
  }
}

/// Matrix-kind letters of a routine name, they depend on the storage.
pub fn kind_fragment(kind: Kind, storage: Storage) -> &'static str {
  match (storage, kind) {
    (Storage::Dense, Kind::Symmetric)  => "sy",
    (Storage::Dense, Kind::Hermitian)  => "he",
    (Storage::Dense, Kind::General)    => "ge",
    (Storage::Banded, Kind::Symmetric) => "sb",
    (Storage::Banded, Kind::Hermitian) => "hb",
    (Storage::Banded, Kind::General)   => "gb",
    (Storage::Sparse, Kind::Symmetric) => "scsr",
    (Storage::Sparse, Kind::Hermitian) => "hcsr",
    (Storage::Sparse, Kind::General)   => "gcsr",
  }
}

// ---------------------------------------------------------------------------------- //

/// One row of the routine table: a label a storage supports together with the
/// groups describing its matrix and its auxiliary matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiRow {
  pub label: Label,
  pub matrix: GroupName,
  pub auxiliary: GroupName,
}

pub type RowSpec = (Domain, Kind, GroupName, GroupName);

const SELF_ADJOINT_LIKE: (GroupName, GroupName) = (GroupName::SymmetricMatrix, GroupName::SymmetricAuxiliary);
const GENERAL: (GroupName, GroupName) = (GroupName::GeneralMatrix, GroupName::GeneralAuxiliary);

const ROWS: [RowSpec; 5] = [
  (Domain::Real,    Kind::Symmetric, SELF_ADJOINT_LIKE.0, SELF_ADJOINT_LIKE.1),
  (Domain::Complex, Kind::Symmetric, SELF_ADJOINT_LIKE.0, SELF_ADJOINT_LIKE.1),
  (Domain::Complex, Kind::Hermitian, SELF_ADJOINT_LIKE.0, SELF_ADJOINT_LIKE.1),
  (Domain::Real,    Kind::General,   GENERAL.0,           GENERAL.1          ),
  (Domain::Complex, Kind::General,   GENERAL.0,           GENERAL.1          ),
];

/// Routines the solver documents for every storage kind.
pub const ROUTINES: [(Storage, &[RowSpec]); 3] = [
  (Storage::Dense,  &ROWS),
  (Storage::Banded, &ROWS),
  (Storage::Sparse, &ROWS),
];

/// Validated routine table. It is built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AxisTable {
  rows: Vec<(Storage, Vec<ApiRow>)>,
}

impl AxisTable {

  /// Builds the table of documented routines.
  pub fn new() -> GenResult<Self> {
    Self::from_rows(&ROUTINES)
  }

  /// Builds a table from raw rows. Invalid labels, labels listed twice for one
  /// storage and rows whose groups do not fit the label are rejected here,
  /// never later during expansion.
  pub fn from_rows(routines: &[(Storage, &[RowSpec])]) -> GenResult<Self> {
    let mut rows = Vec::with_capacity(routines.len());
    for (storage, specs) in routines {
      let mut storage_rows: Vec<ApiRow> = Vec::with_capacity(specs.len());
      for &(domain, kind, matrix, auxiliary) in specs.iter() {
        let label = Label::new(domain, kind)?;
        let pairing_error = |reason| GenError::UnsupportedStorageOrKindPairing { storage: *storage, domain, kind, reason };
        let expected = if label.is_two_sided() { GENERAL } else { SELF_ADJOINT_LIKE };
        if matrix != expected.0 {
          return Err(pairing_error("matrix group does not match the matrix kind"));
        }
        if auxiliary != expected.1 {
          return Err(pairing_error("auxiliary group does not match the matrix kind"));
        }
        if storage_rows.iter().any(|r| r.label == label) {
          return Err(pairing_error("label is listed twice"));
        }
        storage_rows.push(ApiRow { label, matrix, auxiliary });
      }
      rows.push((*storage, storage_rows));
    }
    Ok(Self { rows })
  }

  pub fn rows(&self) -> impl Iterator<Item = (Storage, &[ApiRow])> {
    self.rows.iter().map(|(storage, rows)| (*storage, &rows[..]))
  }
}
