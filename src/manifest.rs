use serde::Serialize;

use crate::{
  axis::Native,
  error::GenResult,
  expand::{
    Descriptor,
    Variant,
  },
  params::{
    GroupName,
    Intent,
    Role,
    Shape,
  },
  render::{
    ident,
    Naming,
  },
};

// ---------------------------------------------------------------------------------- //

#[derive(Debug, Serialize)]
pub struct ParameterEntry {
  pub name: &'static str,
  /// Identifier the declaration uses, differs from `name` for reserved words.
  pub ident: String,
  pub group: GroupName,
  pub role: Role,
  pub native: Native,
  pub abi: String,
  pub shape: Shape,
  pub intent: Intent,
}

#[derive(Debug, Serialize)]
pub struct RoutineEntry {
  pub symbol: String,
  pub link_name: String,
  #[serde(flatten)]
  pub descriptor: Descriptor,
  pub parameters: Vec<ParameterEntry>,
}

impl RoutineEntry {
  pub fn new(variant: &Variant, naming: Naming) -> Self {
    let label = variant.descriptor.label;
    let parameters = variant.groups.iter()
      .flat_map(|g| g.params.iter().map(move |p| (g.name, p)))
      .map(|(group, p)| {
        let native = p.tag.resolve(&label);
        ParameterEntry {
          name: p.name,
          ident: ident(p).into_owned(),
          group,
          role: p.role,
          native,
          abi: format!("{} {}", p.intent.pointer(), native.abi_type()),
          shape: p.shape,
          intent: p.intent,
        }
      })
      .collect();
    Self {
      symbol: variant.descriptor.symbol(),
      link_name: naming.symbol(&variant.descriptor),
      descriptor: variant.descriptor,
      parameters,
    }
  }
}

/// JSON description of every routine and its parameters.
pub fn render_manifest(variants: &[Variant], naming: Naming) -> GenResult<String> {
  let entries: Vec<RoutineEntry> = variants.iter().map(|v| RoutineEntry::new(v, naming)).collect();
  Ok(serde_json::to_string_pretty(&entries)?)
}

#[cfg(test)]
mod tests {
  use serde_json::Value;
  use crate::{
    axis::AxisTable,
    expand::expand,
    render::Naming,
  };
  use super::render_manifest;

  #[test]
  fn test_manifest() {
    let variants = expand(&AxisTable::new().unwrap());
    let text = render_manifest(&variants, Naming::Reference).unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();
    let routines = value.as_array().unwrap();
    assert_eq!(routines.len(), 120);
    let syev = routines.iter().find(|r| r["symbol"] == "dfeast_syev").unwrap();
    assert_eq!(syev["link_name"], "dfeast_syev_");
    assert_eq!(syev["interval"], "explicit_range");
    assert_eq!(syev["storage"], "dense");
    assert_eq!(syev["contour"], false);
    let loop_param = &syev["parameters"][6];
    assert_eq!(loop_param["name"], "loop");
    assert_eq!(loop_param["ident"], "loop_");
    assert_eq!(loop_param["intent"], "out");
    assert_eq!(syev["parameters"][11]["shape"]["buffer"], "eigenvectors");
    assert_eq!(syev["parameters"][11]["abi"], "*mut f64");
  }
}
