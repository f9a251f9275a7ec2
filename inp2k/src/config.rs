//! This module implements the TOML configuration file. Everything in it is
//! optional: paths can come from the command line instead, and any table left
//! out keeps its built-in default.

use std::path::{Path, PathBuf};

use inp::faces::FaceTable;
use kfile::tables::{IdTable, SetIdTables};
use serde::{Deserialize, Serialize};

use crate::convert::ConvertError;

/// A conversion configuration file.
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
  /// The deck to read.
  pub(crate) input: Option<PathBuf>,
  /// The keyword file to write.
  pub(crate) output: Option<PathBuf>,
  /// Replacement face definitions.
  #[serde(alias = "face")]
  pub(crate) faces: Option<FaceTable>,
  /// Replacement node set IDs.
  #[serde(alias = "nodeset_ids")]
  pub(crate) node_sets: Option<IdTable>,
  /// Replacement segment set IDs.
  #[serde(alias = "segmentset_ids")]
  pub(crate) segment_sets: Option<IdTable>,
  /// Replacement element set IDs.
  #[serde(alias = "elementset_ids")]
  pub(crate) element_sets: Option<IdTable>,
}

impl Config {
  /// Reads a config file. Relative paths inside it are taken relative to the
  /// file's own directory.
  pub(crate) fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConvertError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let mut config: Config = toml::from_str(&contents)?;
    if let Some(base) = path.as_ref().parent() {
      config.input = config.input.map(|p| base.join(p));
      config.output = config.output.map(|p| base.join(p));
    }
    return Ok(config);
  }

  /// Returns the face table: the configured one, or the default.
  pub(crate) fn face_table(&self) -> FaceTable {
    return self.faces.clone().map_or_else(FaceTable::default, FaceTable::normalised);
  }

  /// Returns the set ID tables, replacing defaults with what was configured.
  pub(crate) fn id_tables(&self) -> SetIdTables {
    let defaults = SetIdTables::default();
    return SetIdTables {
      node_sets: self.node_sets.clone().unwrap_or(defaults.node_sets),
      segment_sets: self.segment_sets.clone().unwrap_or(defaults.segment_sets),
      element_sets: self.element_sets.clone().unwrap_or(defaults.element_sets),
    }.normalised();
  }
}
