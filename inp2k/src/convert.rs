//! This module implements a single conversion job: where to read, where to
//! write, and which tables to use along the way.

use std::error::Error;
use std::fmt::Display;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use inp::prelude::*;
use kfile::prelude::*;
use log::{debug, info};

use crate::config::Config;

/// Anything that can stop a conversion.
#[derive(Debug, derive_more::From)]
pub(crate) enum ConvertError {
  /// Reading or writing a file failed.
  Io(io::Error),
  /// The configuration file is not valid TOML or has unknown keys.
  Config(toml::de::Error),
  /// The deck could not be read.
  Inp(InpError),
  /// The keyword file could not be written.
  Write(WriteError),
  /// No input or no output path was given anywhere.
  MissingPaths,
}

impl Display for ConvertError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    return match self {
      Self::Io(e) => write!(f, "{}", e),
      Self::Config(e) => write!(f, "bad configuration file: {}", e),
      Self::Inp(e) => write!(f, "{}", e),
      Self::Write(e) => write!(f, "{}", e),
      Self::MissingPaths => write!(f, "an input and an output path are needed"),
    };
  }
}

impl Error for ConvertError {}

/// Reading from this path means reading from standard input.
const STDIN_PATH: &str = "-";

/// A fully-specified conversion.
#[derive(Clone, Debug)]
pub(crate) struct Job {
  /// The deck to read.
  pub(crate) input: PathBuf,
  /// The keyword file to write.
  pub(crate) output: PathBuf,
  /// Face definitions.
  pub(crate) faces: FaceTable,
  /// Set ID tables.
  pub(crate) ids: SetIdTables,
}

impl Job {
  /// Puts a job together from an optional config file and optional paths
  /// given on the command line, which take precedence.
  pub(crate) fn assemble(
    config: Option<&Path>,
    input: Option<PathBuf>,
    output: Option<PathBuf>
  ) -> Result<Self, ConvertError> {
    let config = match config {
      Some(p) => {
        debug!("Loading configuration from {}...", p.display());
        Config::load(p)?
      },
      None => Config::default(),
    };
    let input = input.or_else(|| config.input.clone());
    let output = output.or_else(|| config.output.clone());
    let (input, output) = match (input, output) {
      (Some(i), Some(o)) => (i, o),
      _ => return Err(ConvertError::MissingPaths),
    };
    return Ok(Self {
      input,
      output,
      faces: config.face_table(),
      ids: config.id_tables(),
    });
  }

  /// Reads the input deck.
  pub(crate) fn read_mesh(&self) -> Result<Mesh, ConvertError> {
    if self.input.as_os_str() == STDIN_PATH {
      info!("Parsing standard input...");
      return Ok(InpParser::parse_bufread(BufReader::new(io::stdin()))?);
    }
    info!("Parsing {}...", self.input.display());
    return Ok(InpParser::parse_file(&self.input)?);
  }

  /// Renders a mesh into keyword file contents.
  pub(crate) fn render(
    &self,
    mesh: &Mesh
  ) -> Result<(Vec<u8>, EmitSummary), ConvertError> {
    let mut buf: Vec<u8> = Vec::new();
    let summary = KWriter::new(&self.ids, &self.faces).emit(&mut buf, mesh)?;
    return Ok((buf, summary));
  }

  /// Runs the whole thing. The output file is only created once the mesh has
  /// been read and rendered without errors.
  pub(crate) fn run(&self) -> Result<EmitSummary, ConvertError> {
    let mesh = self.read_mesh()?;
    info!(
      "Read {} nodes, {} elements, {} node sets, {} surfaces, {} element sets.",
      mesh.nodes.len(),
      mesh.elements.len(),
      mesh.node_sets.len(),
      mesh.surfaces.len(),
      mesh.element_sets.len()
    );
    let (contents, summary) = self.render(&mesh)?;
    std::fs::write(&self.output, contents)?;
    info!("Wrote {}.", summary);
    return Ok(summary);
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  /// A deck with one hexahedron, a node set, an element set and a surface.
  const DECK: &str = "\
*Node
1, 0., 0., 0.
2, 1., 0., 0.
3, 1., 1., 0.
4, 0., 1., 0.
5, 0., 0., 1.
6, 1., 0., 1.
7, 1., 1., 1.
8, 0., 1., 1.
*Element, type=C3D8R
1, 1, 2, 3, 4, 5, 6, 7, 8
*Nset, nset=K1A
1, 2, 3, 4
*Elset, elset=Fluid1
1
*Surface, type=ELEMENT, name=FACEK1A
1, S2
";

  #[test]
  fn test_argv_job() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mesh.inp");
    let output = dir.path().join("mesh.k");
    fs::write(&input, DECK).unwrap();
    let job = Job::assemble(None, Some(input), Some(output.clone())).unwrap();
    let summary = job.run().unwrap();
    assert_eq!(summary.segments, 1);
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("*DUALCESE_NODE3D\n1, 0, 0, 0, 0, 0\n"));
    assert!(text.contains("*DUALCESE_NODESET\n       999\n1, 2, 3, 4\n"));
    assert!(text.contains("       555\n5, 8, 7, 6,0.0,0.0,0.0,0.0\n"));
    assert!(text.contains("$ Element set: FLUID1\n*DUALCESE_ELEMENTSET\n"));
    assert!(text.ends_with("      2222\n1\n*END\n"));
  }

  #[test]
  fn test_missing_paths() {
    assert!(matches!(
      Job::assemble(None, Some("a.inp".into()), None),
      Err(ConvertError::MissingPaths)
    ));
    assert!(matches!(
      Job::assemble(None, None, None),
      Err(ConvertError::MissingPaths)
    ));
  }

  #[test]
  fn test_config_job() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("mesh.inp"), DECK).unwrap();
    let config = dir.path().join("conv.toml");
    fs::write(&config, "\
input = \"mesh.inp\"
output = \"out.k\"

[node_sets]
k1a = 1

[faces]
S2 = [1, 2, 3, 4]
").unwrap();
    let job = Job::assemble(Some(config.as_path()), None, None).unwrap();
    assert_eq!(job.input, dir.path().join("mesh.inp"));
    assert_eq!(job.ids.lookup(SetKind::NodeSet, "K1A").unwrap(), 1);
    // untouched namespaces keep their defaults
    assert_eq!(job.ids.lookup(SetKind::ElementSet, "FLUID1").unwrap(), 2222);
    assert_eq!(job.faces.len(), 1);
    job.run().unwrap();
    let text = fs::read_to_string(dir.path().join("out.k")).unwrap();
    assert!(text.contains("*DUALCESE_NODESET\n       1\n"));
    assert!(text.contains("       555\n1, 2, 3, 4,0.0,0.0,0.0,0.0\n"));
  }

  #[test]
  fn test_command_line_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("conv.toml");
    fs::write(&config, "input = \"a.inp\"\noutput = \"a.k\"\n").unwrap();
    let other = dir.path().join("b.k");
    let job = Job::assemble(Some(config.as_path()), None, Some(other.clone())).unwrap();
    assert_eq!(job.input, dir.path().join("a.inp"));
    assert_eq!(job.output, other);
    assert_eq!(job.ids, SetIdTables::default());
  }

  #[test]
  fn test_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("conv.toml");
    fs::write(&config, "inptu = \"typo.inp\"\n").unwrap();
    assert!(matches!(
      Job::assemble(Some(config.as_path()), None, None),
      Err(ConvertError::Config(_))
    ));
  }

  #[test]
  fn test_no_output_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("mesh.inp");
    let output = dir.path().join("mesh.k");
    fs::write(&input, format!("{}*Nset, nset=UNKNOWN\n1\n", DECK)).unwrap();
    let job = Job::assemble(None, Some(input.clone()), Some(output.clone()))
      .unwrap();
    assert!(matches!(
      job.run(),
      Err(ConvertError::Write(WriteError::MissingSetId { .. }))
    ));
    assert!(!output.exists());
    // same for a broken deck
    fs::write(&input, "*Surface, name=FACEK1A\n1, S1, S2\n").unwrap();
    assert!(matches!(
      job.run(),
      Err(ConvertError::Inp(InpError::Structural { line: 2, .. }))
    ));
    assert!(!output.exists());
  }
}
