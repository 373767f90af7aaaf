//! Generator of Rust bindings for the FEAST eigenvalue solver family.
//!
//! Routine variants are enumerated from a small set of axis tables, every
//! variant is given its ordered and typed native parameter list, and two
//! modules are rendered from that model: native `extern "C"` declarations and
//! safe wrappers built on top of the `feastwrap` runtime crate.

mod error;
mod axis;
mod params;
mod expand;
mod render;
mod wrapper;
mod manifest;
mod config;
mod artifacts;
#[cfg(feature = "python")]
mod python;

pub use error::{GenError, GenResult};
pub use axis::{
  kind_fragment,
  scalar,
  type_fragment,
  ApiRow,
  AxisTable,
  Domain,
  IntervalStyle,
  Kind,
  Label,
  Native,
  Precision,
  Problem,
  RowSpec,
  Storage,
  ROUTINES,
};
pub use params::{
  build,
  Extent,
  GroupName,
  GroupSet,
  Intent,
  Operand,
  Parameter,
  ParameterGroup,
  Role,
  Shape,
  TypeTag,
};
pub use expand::{expand, find, Descriptor, Variant};
pub use render::{
  ident,
  local,
  parse_decl,
  render_call,
  render_decl,
  render_declarations,
  Naming,
  ParsedDecl,
  RESERVED,
};
pub use wrapper::{render_wrapper, render_wrappers};
pub use manifest::{render_manifest, ParameterEntry, RoutineEntry};
pub use config::GenConfig;
pub use artifacts::Artifacts;
