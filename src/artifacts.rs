use std::{
  io::Write,
  path::{
    Path,
    PathBuf,
  },
};

use tempfile::NamedTempFile;
use tracing::info;

use crate::{
  axis::AxisTable,
  config::GenConfig,
  error::{
    GenError,
    GenResult,
  },
  expand::expand,
  render::render_declarations,
  wrapper::render_wrappers,
};

// ---------------------------------------------------------------------------------- //

/// Both generated modules, fully rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
  pub declarations: String,
  pub wrappers: String,
}

impl Artifacts {

  /// Runs the whole generation pass. Nothing touches the file system here.
  pub fn render(table: &AxisTable, config: &GenConfig) -> GenResult<Self> {
    let variants = expand(table);
    let wrappers = render_wrappers(&variants, &config.wrappers, config.naming, &config.decl_module)?;
    let declarations = render_declarations(&variants, config.naming, &config.libraries);
    Ok(Self { declarations, wrappers })
  }

  /// Writes both modules into `dir`. Each file is staged in a temporary file
  /// next to its destination and only moved in place once both are staged.
  /// The moves are sequential: wrappers first, declarations last. If the second
  /// move fails, the new wrappers sit next to the old declarations and the
  /// error names the declaration file.
  pub fn write(&self, dir: &Path, config: &GenConfig) -> GenResult<Vec<PathBuf>> {
    let io_error = |path: &Path| {
      let path = path.to_owned();
      move |source: std::io::Error| GenError::Io { path, source }
    };
    let targets = [
      (dir.join(&config.wrappers_file), &self.wrappers),
      (dir.join(&config.declarations_file), &self.declarations),
    ];
    let mut staged = Vec::with_capacity(targets.len());
    for (path, text) in &targets {
      let mut file = NamedTempFile::new_in(dir).map_err(io_error(path.as_path()))?;
      file.write_all(text.as_bytes()).map_err(io_error(path.as_path()))?;
      file.flush().map_err(io_error(path.as_path()))?;
      staged.push((file, path.clone()));
    }
    let mut written = Vec::with_capacity(staged.len());
    for (file, path) in staged {
      file.persist(&path).map_err(|e| GenError::Io { path: path.clone(), source: e.error })?;
      info!("Wrote {}", path.display());
      written.push(path);
    }
    Ok(written)
  }
}

#[cfg(test)]
mod tests {
  use std::fs;
  use tempfile::tempdir;
  use crate::{
    axis::AxisTable,
    config::GenConfig,
    error::GenError,
  };
  use super::Artifacts;

  #[test]
  fn test_generation_is_idempotent() {
    let table = AxisTable::new().unwrap();
    let config = GenConfig::default();
    assert_eq!(Artifacts::render(&table, &config).unwrap(), Artifacts::render(&table, &config).unwrap());
  }

  #[test]
  fn test_write() {
    let dir = tempdir().unwrap();
    let config = GenConfig::default();
    let artifacts = Artifacts::render(&AxisTable::new().unwrap(), &config).unwrap();
    let written = artifacts.write(dir.path(), &config).unwrap();
    assert_eq!(written, [dir.path().join("feast.rs"), dir.path().join("feast_sys.rs")]);
    assert_eq!(fs::read_to_string(&written[0]).unwrap(), artifacts.wrappers);
    assert_eq!(fs::read_to_string(&written[1]).unwrap(), artifacts.declarations);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
  }

  #[test]
  fn test_unknown_wrapper_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = GenConfig { wrappers: vec!["sfeast_heev".to_owned()], ..GenConfig::default() };
    let err = Artifacts::render(&AxisTable::new().unwrap(), &config)
      .and_then(|artifacts| artifacts.write(dir.path(), &config))
      .unwrap_err();
    assert!(matches!(err, GenError::UnknownSymbol(s) if s == "sfeast_heev"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
  }

  #[test]
  fn test_declarations_are_moved_last() {
    let dir = tempdir().unwrap();
    let config = GenConfig::default();
    let artifacts = Artifacts::render(&AxisTable::new().unwrap(), &config).unwrap();
    // a directory in place of the declaration file makes the last move fail
    let declarations = dir.path().join("feast_sys.rs");
    fs::create_dir(&declarations).unwrap();
    let err = artifacts.write(dir.path(), &config).unwrap_err();
    assert!(matches!(err, GenError::Io { ref path, .. } if *path == declarations));
    assert_eq!(fs::read_to_string(dir.path().join("feast.rs")).unwrap(), artifacts.wrappers);
    assert!(declarations.is_dir());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
  }

  #[test]
  fn test_missing_directory_is_reported() {
    let dir = tempdir().unwrap();
    let config = GenConfig::default();
    let artifacts = Artifacts::render(&AxisTable::new().unwrap(), &config).unwrap();
    let missing = dir.path().join("absent");
    assert!(matches!(artifacts.write(&missing, &config), Err(GenError::Io { .. })));
  }
}
