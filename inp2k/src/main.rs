//! A command-line application to convert meshes from Abaqus-like input decks
//! into LS-DYNA DUALCESE keyword files.

#![allow(clippy::needless_return)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub(crate) mod config;
pub(crate) mod convert;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use log::*;

use crate::convert::{ConvertError, Job};

/// The arguments passed to the converter.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
struct Cli {
  /// TOML file with the input/output paths and/or the face and set ID tables.
  /// Paths given as arguments take precedence over the ones in it.
  #[arg(short = 'c', long = "config")]
  config: Option<PathBuf>,
  /// Output extra/debug info while parsing and converting.
  #[arg(short = 'v', long = "verbose")]
  verbose: bool,
  /// The input deck (.inp). If -, reads from standard input.
  input: Option<PathBuf>,
  /// The keyword file (.k) to write.
  output: Option<PathBuf>,
}

fn main() {
  // init cli stuff
  let args = Cli::parse();
  let log_level = if args.verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Info
  };
  env_logger::builder().filter_level(log_level).init();
  // put the job together
  let job = match Job::assemble(args.config.as_deref(), args.input, args.output) {
    Ok(job) => job,
    Err(ConvertError::MissingPaths) => {
      eprintln!("{}", Cli::command().render_usage());
      std::process::exit(1);
    },
    Err(e) => {
      error!("{}", e);
      std::process::exit(1);
    }
  };
  // run it
  if let Err(e) = job.run() {
    error!("Conversion failed: {}", e);
    std::process::exit(1);
  }
  println!("Conversion complete. Output written to: {}", job.output.display());
}
