use serde::Serialize;

pub use feastwrap::Extent;

use crate::axis::{
  scalar,
  Label,
  Native,
  Precision,
  Storage,
};

// ---------------------------------------------------------------------------------- //

/// Matrix operand a parameter describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
  A,
  B,
}

impl Operand {
  /// Name of the wrapper argument carrying the operand.
  pub fn arg(self) -> &'static str {
    match self {
      Operand::A => "a",
      Operand::B => "b",
    }
  }
}

/// Logical identity of a parameter, i.e. what it means to a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  Triangle,
  Dim,
  Values(Operand),
  LeadingDim(Operand),
  LowerBandwidth(Operand),
  UpperBandwidth(Operand),
  RowPointers(Operand),
  ColumnIndices(Operand),
  Config,
  Tolerance,
  Loops,
  IntervalMin,
  IntervalMax,
  Center,
  Radius,
  Subspace,
  Eigenvalues,
  Eigenvectors,
  Modes,
  Residuals,
  Status,
  ContourNodes,
  ContourWeights,
}

/// Symbolic type of a parameter. It turns into a concrete scalar only once
/// the label of a routine is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
  Int,
  Char,
  Real(Precision),
  /// Element type of the matrix.
  Field(Precision),
  Complex(Precision),
  /// Eigenvalue type: real for self-adjoint labels, complex otherwise.
  Spectral(Precision),
  /// Eigenvector type: the field for self-adjoint labels, complex otherwise.
  Vector(Precision),
}

impl TypeTag {
  pub fn resolve(self, label: &Label) -> Native {
    match self {
      TypeTag::Int         => Native::Int,
      TypeTag::Char        => Native::Char,
      TypeTag::Real(p)     => Native::Real(p),
      TypeTag::Complex(p)  => Native::Complex(p),
      TypeTag::Field(p)    => scalar(p, label.domain()),
      TypeTag::Spectral(p) => if label.is_self_adjoint() { Native::Real(p) } else { Native::Complex(p) },
      TypeTag::Vector(p)   => if label.is_self_adjoint() { scalar(p, label.domain()) } else { Native::Complex(p) },
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
  Scalar,
  Buffer(Extent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
  In,
  Out,
  InOut,
}

impl Intent {
  pub fn pointer(self) -> &'static str {
    match self {
      Intent::In                => "*const",
      Intent::Out | Intent::InOut => "*mut",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Parameter {
  pub role: Role,
  /// Logical name, as the native documentation spells it.
  pub name: &'static str,
  pub tag: TypeTag,
  pub shape: Shape,
  pub intent: Intent,
}

impl Parameter {
  fn scalar(role: Role, name: &'static str, tag: TypeTag, intent: Intent) -> Self {
    Self { role, name, tag, shape: Shape::Scalar, intent }
  }

  fn buffer(role: Role, name: &'static str, tag: TypeTag, extent: Extent, intent: Intent) -> Self {
    Self { role, name, tag, shape: Shape::Buffer(extent), intent }
  }

  pub fn is_buffer(&self) -> bool {
    matches!(self.shape, Shape::Buffer(_))
  }
}

// ---------------------------------------------------------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupName {
  SymmetricMatrix,
  GeneralMatrix,
  SymmetricAuxiliary,
  GeneralAuxiliary,
  CommonPre,
  ExplicitRange,
  ContourRadius,
  CommonPost,
  ContourNodes,
}

/// Named, ordered sequence of parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterGroup {
  pub name: GroupName,
  pub params: Vec<Parameter>,
}

impl ParameterGroup {
  fn new(name: GroupName, params: Vec<Parameter>) -> Self {
    Self { name, params }
  }

  /// Returns true if the group carries the triangle selector.
  pub fn has_triangle(&self) -> bool {
    self.params.iter().any(|p| p.role == Role::Triangle)
  }
}

/// Every group of one (storage, precision) pair.
#[derive(Debug, Clone)]
pub struct GroupSet {
  symmetric_matrix: ParameterGroup,
  general_matrix: ParameterGroup,
  symmetric_auxiliary: ParameterGroup,
  general_auxiliary: ParameterGroup,
  common_pre: ParameterGroup,
  explicit_range: ParameterGroup,
  contour_radius: ParameterGroup,
  common_post: ParameterGroup,
  contour_nodes: ParameterGroup,
}

impl GroupSet {
  pub fn group(&self, name: GroupName) -> &ParameterGroup {
    match name {
      GroupName::SymmetricMatrix    => &self.symmetric_matrix,
      GroupName::GeneralMatrix      => &self.general_matrix,
      GroupName::SymmetricAuxiliary => &self.symmetric_auxiliary,
      GroupName::GeneralAuxiliary   => &self.general_auxiliary,
      GroupName::CommonPre          => &self.common_pre,
      GroupName::ExplicitRange      => &self.explicit_range,
      GroupName::ContourRadius      => &self.contour_radius,
      GroupName::CommonPost         => &self.common_post,
      GroupName::ContourNodes       => &self.contour_nodes,
    }
  }
}

// ---------------------------------------------------------------------------------- //

fn values(operand: Operand, name: &'static str, p: Precision) -> Parameter {
  Parameter::buffer(Role::Values(operand), name, TypeTag::Field(p), Extent::Values, Intent::In)
}

fn int_in(role: Role, name: &'static str) -> Parameter {
  Parameter::scalar(role, name, TypeTag::Int, Intent::In)
}

fn int_out(role: Role, name: &'static str) -> Parameter {
  Parameter::scalar(role, name, TypeTag::Int, Intent::Out)
}

fn index_buffer(role: Role, name: &'static str, extent: Extent) -> Parameter {
  Parameter::buffer(role, name, TypeTag::Int, extent, Intent::In)
}

fn triangle() -> Parameter {
  Parameter::scalar(Role::Triangle, "uplo", TypeTag::Char, Intent::In)
}

fn dim() -> Parameter {
  int_in(Role::Dim, "n")
}

/// Matrix groups: (symmetric, general, symmetric auxiliary, general auxiliary).
fn matrix_groups(storage: Storage, p: Precision) -> [Vec<Parameter>; 4] {
  use Operand::{A, B};
  match storage {
    Storage::Dense => {
      let auxiliary = vec![values(B, "b", p), int_in(Role::LeadingDim(B), "ldb")];
      [
        vec![triangle(), dim(), values(A, "a", p), int_in(Role::LeadingDim(A), "lda")],
        vec![dim(), values(A, "a", p), int_in(Role::LeadingDim(A), "lda")],
        auxiliary.clone(),
        auxiliary,
      ]
    },
    Storage::Banded => [
      vec![
        triangle(), dim(),
        int_in(Role::LowerBandwidth(A), "kla"),
        values(A, "a", p),
        int_in(Role::LeadingDim(A), "lda"),
      ],
      vec![
        dim(),
        int_in(Role::LowerBandwidth(A), "kla"),
        int_in(Role::UpperBandwidth(A), "kua"),
        values(A, "a", p),
        int_in(Role::LeadingDim(A), "lda"),
      ],
      vec![
        int_in(Role::LowerBandwidth(B), "klb"),
        values(B, "b", p),
        int_in(Role::LeadingDim(B), "ldb"),
      ],
      vec![
        int_in(Role::LowerBandwidth(B), "klb"),
        int_in(Role::UpperBandwidth(B), "kub"),
        values(B, "b", p),
        int_in(Role::LeadingDim(B), "ldb"),
      ],
    ],
    Storage::Sparse => {
      let auxiliary = vec![
        values(B, "sb", p),
        index_buffer(Role::RowPointers(B), "isb", Extent::RowPointers),
        index_buffer(Role::ColumnIndices(B), "jsb", Extent::ColumnIndices),
      ];
      [
        vec![
          triangle(), dim(),
          values(A, "sa", p),
          index_buffer(Role::RowPointers(A), "isa", Extent::RowPointers),
          index_buffer(Role::ColumnIndices(A), "jsa", Extent::ColumnIndices),
        ],
        vec![
          dim(),
          values(A, "sa", p),
          index_buffer(Role::RowPointers(A), "isa", Extent::RowPointers),
          index_buffer(Role::ColumnIndices(A), "jsa", Extent::ColumnIndices),
        ],
        auxiliary.clone(),
        auxiliary,
      ]
    },
  }
}

/// Builds every parameter group of a storage kind at a given precision.
pub fn build(storage: Storage, p: Precision) -> GroupSet {
  let [symmetric, general, symmetric_auxiliary, general_auxiliary] = matrix_groups(storage, p);
  GroupSet {
    symmetric_matrix: ParameterGroup::new(GroupName::SymmetricMatrix, symmetric),
    general_matrix: ParameterGroup::new(GroupName::GeneralMatrix, general),
    symmetric_auxiliary: ParameterGroup::new(GroupName::SymmetricAuxiliary, symmetric_auxiliary),
    general_auxiliary: ParameterGroup::new(GroupName::GeneralAuxiliary, general_auxiliary),
    common_pre: ParameterGroup::new(GroupName::CommonPre, vec![
      Parameter::buffer(Role::Config, "fpm", TypeTag::Int, Extent::Config, Intent::In),
      Parameter::scalar(Role::Tolerance, "epsout", TypeTag::Real(p), Intent::Out),
      int_out(Role::Loops, "loop"),
    ]),
    explicit_range: ParameterGroup::new(GroupName::ExplicitRange, vec![
      Parameter::scalar(Role::IntervalMin, "emin", TypeTag::Real(p), Intent::In),
      Parameter::scalar(Role::IntervalMax, "emax", TypeTag::Real(p), Intent::In),
    ]),
    contour_radius: ParameterGroup::new(GroupName::ContourRadius, vec![
      Parameter::scalar(Role::Center, "emid", TypeTag::Complex(p), Intent::In),
      Parameter::scalar(Role::Radius, "r", TypeTag::Real(p), Intent::In),
    ]),
    common_post: ParameterGroup::new(GroupName::CommonPost, vec![
      Parameter::scalar(Role::Subspace, "m0", TypeTag::Int, Intent::InOut),
      Parameter::buffer(Role::Eigenvalues, "lambda", TypeTag::Spectral(p), Extent::Eigenvalues, Intent::Out),
      Parameter::buffer(Role::Eigenvectors, "q", TypeTag::Vector(p), Extent::Eigenvectors, Intent::InOut),
      int_out(Role::Modes, "mode"),
      Parameter::buffer(Role::Residuals, "res", TypeTag::Real(p), Extent::Residuals, Intent::Out),
      int_out(Role::Status, "info"),
    ]),
    contour_nodes: ParameterGroup::new(GroupName::ContourNodes, vec![
      Parameter::buffer(Role::ContourNodes, "zne", TypeTag::Complex(p), Extent::ContourPoints, Intent::Out),
      Parameter::buffer(Role::ContourWeights, "wne", TypeTag::Complex(p), Extent::ContourPoints, Intent::Out),
    ]),
  }
}
