//! feastgen command line entry point.

use std::{
  fs,
  path::PathBuf,
};

use anyhow::{
  Context,
  Result,
};
use clap::{
  Parser,
  Subcommand,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use feastgen::{
  expand,
  find,
  render_decl,
  render_manifest,
  render_wrapper,
  Artifacts,
  AxisTable,
  GenConfig,
  GenError,
  Naming,
  Storage,
};

#[derive(Parser, Debug)]
#[command(name = "feastgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Configuration file, defaults are used when it does not exist.
  #[arg(short, long, value_name = "FILE", default_value = "feastgen.toml")]
  config: PathBuf,

  /// Symbol flavor, overrides the configuration.
  #[arg(long, value_enum)]
  naming: Option<Naming>,

  #[arg(short, long)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// Writes the declaration and wrapper modules.
  Generate {
    #[arg(short, long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Routine to wrap, may be repeated. Overrides the configured list.
    #[arg(short, long = "wrapper", value_name = "SYMBOL")]
    wrappers: Vec<String>,

    /// Native library to link, may be repeated.
    #[arg(short, long = "link", value_name = "NAME")]
    libraries: Vec<String>,
  },

  /// Lists routine names in canonical order.
  List {
    #[arg(long)]
    dense: bool,

    #[arg(long)]
    banded: bool,

    #[arg(long)]
    sparse: bool,
  },

  /// Prints the declaration and wrapper of one routine.
  Show {
    symbol: String,
  },

  /// Prints a JSON description of every routine.
  Manifest {
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
  let subscriber = FmtSubscriber::builder()
    .with_max_level(log_level)
    .with_target(false)
    .with_writer(std::io::stderr)
    .finish();
  tracing::subscriber::set_global_default(subscriber)?;

  let mut config = GenConfig::load(&cli.config)?;
  if let Some(naming) = cli.naming {
    config.naming = naming;
  }
  let table = AxisTable::new()?;

  match cli.command {
    Commands::Generate { out_dir, wrappers, libraries } => {
      if !wrappers.is_empty() {
        config.wrappers = wrappers;
      }
      if !libraries.is_empty() {
        config.libraries = libraries;
      }
      let dir = out_dir.unwrap_or_else(|| config.out_dir.clone());
      fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
      let artifacts = Artifacts::render(&table, &config)?;
      artifacts.write(&dir, &config)?;
    },
    Commands::List { dense, banded, sparse } => {
      let wanted = [(Storage::Dense, dense), (Storage::Banded, banded), (Storage::Sparse, sparse)];
      let all = wanted.iter().all(|(_, on)| !on);
      for variant in expand(&table) {
        let storage = variant.descriptor.storage;
        if all || wanted.iter().any(|(s, on)| *on && *s == storage) {
          println!("{}", variant.descriptor.symbol());
        }
      }
    },
    Commands::Show { symbol } => {
      let variants = expand(&table);
      let variant = find(&variants, &symbol).ok_or(GenError::UnknownSymbol(symbol))?;
      println!("{}\n", render_decl(variant, config.naming));
      print!("{}", render_wrapper(variant, config.naming));
    },
    Commands::Manifest { output } => {
      let text = render_manifest(&expand(&table), config.naming)?;
      match output {
        Some(path) => fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{text}"),
      }
    },
  }

  Ok(())
}
