use std::fmt::{
  Display,
  Formatter,
};

use serde::Serialize;
use tracing::debug;

use crate::{
  axis::{
    kind_fragment,
    type_fragment,
    AxisTable,
    IntervalStyle,
    Label,
    Precision,
    Problem,
    Storage,
  },
  params::{
    build,
    GroupName,
    Parameter,
    ParameterGroup,
  },
};

// ---------------------------------------------------------------------------------- //

/// One concrete routine of the solver family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Descriptor {
  pub precision: Precision,
  pub label: Label,
  pub storage: Storage,
  pub problem: Problem,
  pub interval: IntervalStyle,
  /// The routine also returns its contour nodes and weights.
  pub contour: bool,
}

impl Descriptor {

  /// Routine name without any naming-flavor decoration,
  /// e.g. `dfeast_syev` or `zfeast_hcsrgvx`.
  pub fn symbol(&self) -> String {
    format!(
      "{}feast_{}{}v{}",
      type_fragment(self.precision, self.label.domain()),
      kind_fragment(self.label.kind(), self.storage),
      self.problem.fragment(),
      if self.contour { "x" } else { "" },
    )
  }
}

impl Display for Descriptor {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.symbol())
  }
}

/// A descriptor with its ordered parameter groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
  pub descriptor: Descriptor,
  pub groups: Vec<ParameterGroup>,
}

impl Variant {
  /// Parameters in call order.
  pub fn params(&self) -> impl Iterator<Item = &Parameter> {
    self.groups.iter().flat_map(|g| g.params.iter())
  }

  pub fn group(&self, name: GroupName) -> Option<&ParameterGroup> {
    self.groups.iter().find(|g| g.name == name)
  }

  pub fn has_triangle(&self) -> bool {
    self.groups.first().map_or(false, |g| g.has_triangle())
  }
}

// ---------------------------------------------------------------------------------- //

/// Enumerates every routine of the table. The order is storage, then label in
/// table order, then precision, problem and finally the contour flag, and it
/// is identical from run to run.
pub fn expand(table: &AxisTable) -> Vec<Variant> {
  let mut variants = Vec::new();
  for (storage, rows) in table.rows() {
    for row in rows {
      for precision in Precision::ALL {
        let groups = build(storage, precision);
        for problem in Problem::ALL {
          for contour in [false, true] {
            let descriptor = Descriptor {
              precision,
              label: row.label,
              storage,
              problem,
              interval: row.label.interval_style(),
              contour,
            };
            let mut chosen = vec![groups.group(row.matrix).clone()];
            if problem == Problem::Generalized {
              chosen.push(groups.group(row.auxiliary).clone());
            }
            chosen.push(groups.group(GroupName::CommonPre).clone());
            chosen.push(match descriptor.interval {
              IntervalStyle::ExplicitRange => groups.group(GroupName::ExplicitRange).clone(),
              IntervalStyle::ContourRadius => groups.group(GroupName::ContourRadius).clone(),
            });
            chosen.push(groups.group(GroupName::CommonPost).clone());
            if contour {
              chosen.push(groups.group(GroupName::ContourNodes).clone());
            }
            variants.push(Variant { descriptor, groups: chosen });
          }
        }
      }
    }
    debug!("Expanded {:?} routines, {} variants so far", storage, variants.len());
  }
  variants
}

/// Looks a variant up by its undecorated symbol.
pub fn find<'a>(variants: &'a [Variant], symbol: &str) -> Option<&'a Variant> {
  variants.iter().find(|v| v.descriptor.symbol() == symbol)
}
